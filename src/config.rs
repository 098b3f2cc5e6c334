use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed, in order, for an optional YAML config
pub const CONFIG_CANDIDATES: &[&str] = &["md2docx.yml", "md2docx.yaml"];

/// Suffix appended to the input path when no output directory is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_docx";

/// Config for optional YAML (`md2docx.yml` / `md2docx.yaml`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Extensions that select the markdown rewrite, matched ignoring case.
    pub markdown_extensions: Vec<String>,
    /// Extension given to rewritten markdown files.
    pub target_extension: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            markdown_extensions: vec!["md".to_string()],
            target_extension: "docx".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Strip leading dots so `.md` and `md` mean the same thing
    fn normalized(mut self) -> Self {
        for ext in &mut self.markdown_extensions {
            *ext = ext.trim_start_matches('.').to_string();
        }
        self.markdown_extensions.retain(|ext| !ext.is_empty());
        self.target_extension = self.target_extension.trim_start_matches('.').to_string();
        self
    }

    pub fn is_markdown_extension(&self, ext: &OsStr) -> bool {
        let Some(ext) = ext.to_str() else {
            return false;
        };
        self.markdown_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

/// Attempt to load config from md2docx.yml or md2docx.yaml in `dir`,
/// returning None if neither exists.
pub fn load_config_file(dir: &Path) -> Result<Option<ConvertConfig>> {
    for candidate in CONFIG_CANDIDATES {
        let path = dir.join(candidate);
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = parse_config(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(Some(config));
    }
    Ok(None)
}

pub fn parse_config(text: &str) -> Result<ConvertConfig> {
    if text.trim().is_empty() {
        return Ok(ConvertConfig::default());
    }
    let config: ConvertConfig = serde_yaml::from_str(text)?;
    Ok(config.normalized())
}

/// Input and output roots for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// True when `output` came from the `<input>_docx` default
    pub output_defaulted: bool,
}

impl RunOptions {
    pub fn resolve(input: PathBuf, output: Option<PathBuf>) -> Self {
        match output {
            Some(output) => Self {
                input,
                output,
                output_defaulted: false,
            },
            None => {
                let output = default_output_dir(&input);
                Self {
                    input,
                    output,
                    output_defaulted: true,
                }
            }
        }
    }
}

/// `<input>_docx`. A trailing separator on the input is dropped first so
/// `docs/` maps to `docs_docx` rather than `docs/_docx`.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let mut raw = input.components().as_path().as_os_str().to_os_string();
    raw.push(DEFAULT_OUTPUT_SUFFIX);
    PathBuf::from(raw)
}
