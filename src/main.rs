mod config;
mod convert;
mod error;
mod mirror;
mod types;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use config::{load_config_file, ConvertConfig, RunOptions};
use error::ConvertError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use types::FileAction;

fn cli() -> Command {
    Command::new("md2docx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mirror a directory tree, renaming markdown files to .docx")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("DIR")
                .help("Input directory to convert")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory (default: <input>_docx)")
                .required(false),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

fn init_logger(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    println!("md2docx - Markdown to Docx Converter");

    let mut command = cli();
    let matches = command.get_matches_mut();
    init_logger(matches.get_flag("debug"));

    // Checked by hand so a missing input exits 1 with usage on stdout.
    let Some(input) = matches.get_one::<String>("input") else {
        println!("Error: an input directory is required");
        println!("{}", command.render_usage());
        return ExitCode::FAILURE;
    };
    let output = matches.get_one::<String>("output").map(PathBuf::from);

    match run(RunOptions::resolve(PathBuf::from(input), output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let convert_err = e.downcast_ref::<ConvertError>();
            if let Some(path) = convert_err.and_then(ConvertError::path) {
                log::debug!("Failed on {}", path.display());
            }
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: RunOptions) -> Result<()> {
    if opts.output_defaulted {
        println!(
            "No output directory given, using default: {}",
            opts.output.display()
        );
    }

    mirror::check_input(&opts.input)?;

    let config = load_config_file(Path::new("."))
        .context("failed to load config")?
        .unwrap_or_else(ConvertConfig::default);
    log::debug!("Using config: {:?}", config);

    println!("Converting directory: {}", opts.input.display());
    println!("Output directory: {}", opts.output.display());

    let report = mirror::mirror_tree(&opts.input, &opts.output, &config, print_action)
        .context("conversion failed")?;

    log::info!(
        "{} directories, {} files ({} converted, {} copied)",
        report.directories,
        report.files(),
        report.converted,
        report.copied
    );
    println!("Conversion complete!");
    Ok(())
}

fn print_action(action: &FileAction) {
    println!(
        "{} file: {} -> {}",
        action.policy.label(),
        action.src.display(),
        action.dst.display()
    );
}
