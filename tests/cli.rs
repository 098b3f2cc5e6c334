use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn md2docx() -> Command {
    Command::new(env!("CARGO_BIN_EXE_md2docx"))
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn shows_help() {
    md2docx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn missing_input_flag_is_usage_error() {
    let tmp = tempdir().unwrap();
    md2docx()
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("an input directory is required"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn nonexistent_input_exits_1_without_writes() {
    let tmp = tempdir().unwrap();
    md2docx()
        .current_dir(tmp.path())
        .args(["-i", "nope"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("input directory does not exist"));

    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn converts_scenario_tree_with_default_output() {
    let tmp = tempdir().unwrap();
    let docs = tmp.path().join("docs");
    write(&docs, "a.md", b"hello");
    write(&docs, "img/b.png", &[0xFF, 0xD8]);
    write(&docs, "sub/c.md", b"world");

    md2docx()
        .current_dir(tmp.path())
        .args(["-i", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown to Docx Converter"))
        .stdout(predicate::str::contains("using default: docs_docx"))
        .stdout(predicate::str::contains("Converting file:"))
        .stdout(predicate::str::contains("Copying file:"))
        .stdout(predicate::str::contains("Conversion complete!"));

    let out = tmp.path().join("docs_docx");
    assert_eq!(fs::read(out.join("a.docx")).unwrap(), b"hello");
    assert_eq!(fs::read(out.join("img/b.png")).unwrap(), vec![0xFF, 0xD8]);
    assert_eq!(fs::read(out.join("sub/c.docx")).unwrap(), b"world");
}

#[test]
fn explicit_output_with_long_flags() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("nested/out");
    write(&input, "NOTES.MD", b"loud");
    write(&input, "data.csv", b"a,b\n");

    md2docx()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("using default").not());

    assert_eq!(fs::read(output.join("NOTES.docx")).unwrap(), b"loud");
    assert_eq!(fs::read(output.join("data.csv")).unwrap(), b"a,b\n");
    assert!(!tmp.path().join("in_docx").exists());
}

#[test]
fn config_file_in_working_directory_is_used() {
    let tmp = tempdir().unwrap();
    write(tmp.path(), "md2docx.yml", b"target_extension: txt\n");
    write(&tmp.path().join("docs"), "a.md", b"hello");

    md2docx()
        .current_dir(tmp.path())
        .args(["-i", "docs", "-o", "out"])
        .assert()
        .success();

    assert_eq!(fs::read(tmp.path().join("out/a.txt")).unwrap(), b"hello");
}

#[test]
fn broken_config_file_fails() {
    let tmp = tempdir().unwrap();
    let broken = b"markdown_extensions: {not: [a list\n";
    write(tmp.path(), "md2docx.yml", broken);
    write(&tmp.path().join("docs"), "a.md", b"hello");

    md2docx()
        .current_dir(tmp.path())
        .args(["-i", "docs"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed to load config"));
}

#[cfg(unix)]
#[test]
fn copy_preserves_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in");
    write(&input, "bin/tool.sh", b"#!/bin/sh\necho hi\n");
    let tool = input.join("bin/tool.sh");
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    md2docx().args(["-i"]).arg(&input).assert().success();

    let mode = fs::metadata(tmp.path().join("in_docx/bin/tool.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn failure_mid_walk_exits_1_and_keeps_earlier_files() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    write(&input, "a.txt", b"a");
    write(&input, "b.txt", b"b");
    write(&input, "c.txt", b"c");
    // b.txt cannot be created over an existing directory
    fs::create_dir_all(output.join("b.txt")).unwrap();

    md2docx()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: conversion failed: "))
        .stdout(predicate::str::contains("failed to create destination file"))
        .stdout(predicate::str::contains("Conversion complete!").not());

    assert_eq!(fs::read(output.join("a.txt")).unwrap(), b"a");
    assert!(!output.join("c.txt").exists());
}
