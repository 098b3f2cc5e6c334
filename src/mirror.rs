use crate::config::ConvertConfig;
use crate::convert::{copy_file, rewrite_markdown_as_text};
use crate::error::ConvertError;
use crate::types::{ConversionPolicy, FileAction, MirrorReport, TraversalEntry};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Mode for directories created under the output root on Unix
const DIR_MODE: u32 = 0o755;

/// Make sure `input` exists and is a directory. Performs no writes.
pub fn check_input(input: &Path) -> Result<(), ConvertError> {
    match fs::metadata(input) {
        Ok(md) if md.is_dir() => Ok(()),
        Ok(_) => Err(ConvertError::InputNotDirectory(input.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ConvertError::InputNotFound(input.to_path_buf()))
        }
        Err(source) => Err(ConvertError::StatSource {
            path: input.to_path_buf(),
            source,
        }),
    }
}

/// Pick the policy for a file from its extension alone
pub fn classify(path: &Path, config: &ConvertConfig) -> ConversionPolicy {
    match path.extension() {
        Some(ext) if config.is_markdown_extension(ext) => ConversionPolicy::MarkdownRewrite,
        _ => ConversionPolicy::PassthroughCopy,
    }
}

/// Where a file at `rel_path` under the input root lands under `output`
pub fn target_path(
    output: &Path,
    rel_path: &Path,
    policy: ConversionPolicy,
    config: &ConvertConfig,
) -> PathBuf {
    let dst = output.join(rel_path);
    match policy {
        ConversionPolicy::MarkdownRewrite => dst.with_extension(&config.target_extension),
        ConversionPolicy::PassthroughCopy => dst,
    }
}

/// Mirror `input` into `output`.
///
/// Walks `input` pre-order, creating each directory under `output` before
/// anything inside it, and dispatches every other entry to either the
/// markdown rewrite or a plain copy. `on_action` sees each file right before
/// it is written. The first error stops the walk; whatever was already
/// written stays on disk.
pub fn mirror_tree<F>(
    input: &Path,
    output: &Path,
    config: &ConvertConfig,
    mut on_action: F,
) -> Result<MirrorReport, ConvertError>
where
    F: FnMut(&FileAction),
{
    check_input(input)?;
    if same_directory(input, output) {
        return Err(ConvertError::OutputIsInput(output.to_path_buf()));
    }

    create_dir(output)?;
    let nested_output = nested_output(input, output);
    if let Some(ref skipped) = nested_output {
        log::debug!("Skipping nested output directory {}", skipped.display());
    }

    let mut report = MirrorReport::default();
    let walker = WalkDir::new(input)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| nested_output.as_deref() != Some(e.path()));

    for entry in walker {
        let entry = entry?;
        let rel_path = entry
            .path()
            .strip_prefix(input)
            .unwrap_or(entry.path())
            .to_path_buf();
        let traversal = TraversalEntry {
            rel_path,
            is_dir: entry.file_type().is_dir(),
            is_symlink: entry.file_type().is_symlink(),
        };

        if traversal.is_dir {
            let dst = if traversal.rel_path.as_os_str().is_empty() {
                output.to_path_buf()
            } else {
                output.join(&traversal.rel_path)
            };
            create_dir(&dst)?;
            report.directories += 1;
            continue;
        }

        let policy = classify(&traversal.rel_path, config);
        let action = FileAction {
            policy,
            src: entry.path().to_path_buf(),
            dst: target_path(output, &traversal.rel_path, policy, config),
        };
        on_action(&action);

        let bytes = match policy {
            ConversionPolicy::MarkdownRewrite => {
                let n = rewrite_markdown_as_text(&action.src, &action.dst)?;
                report.converted += 1;
                n
            }
            ConversionPolicy::PassthroughCopy => {
                let n = copy_file(&action.src, &action.dst)?;
                report.copied += 1;
                n
            }
        };
        if traversal.is_symlink {
            log::debug!("Followed link {}", action.src.display());
        }
        log::debug!("Wrote {} ({} bytes)", action.dst.display(), bytes);
    }

    Ok(report)
}

fn create_dir(path: &Path) -> Result<(), ConvertError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path).map_err(|source| ConvertError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Ensured directory {}", path.display());
    Ok(())
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// If `output` sits somewhere below `input`, the path the walker will report
/// for it. Must be called after `output` exists.
fn nested_output(input: &Path, output: &Path) -> Option<PathBuf> {
    let input_abs = input.canonicalize().ok()?;
    let output_abs = output.canonicalize().ok()?;
    let rel = output_abs.strip_prefix(&input_abs).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(input.join(rel))
}
