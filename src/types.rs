use std::path::PathBuf;

/// How a single file is carried into the output tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionPolicy {
    /// Same bytes, new extension, fresh file mode
    MarkdownRewrite,
    /// Byte-identical copy with the source permission bits
    PassthroughCopy,
}

impl ConversionPolicy {
    /// Verb used in progress output
    pub fn label(self) -> &'static str {
        match self {
            ConversionPolicy::MarkdownRewrite => "Converting",
            ConversionPolicy::PassthroughCopy => "Copying",
        }
    }
}

/// One entry produced while walking the input root
#[derive(Debug)]
pub struct TraversalEntry {
    pub rel_path: PathBuf,
    pub is_dir: bool,
    /// Link entries are not followed by the walk, only read through
    pub is_symlink: bool,
}

/// Reported for every file right before it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    pub policy: ConversionPolicy,
    pub src: PathBuf,
    pub dst: PathBuf,
}

/// Totals for a finished walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorReport {
    pub directories: usize,
    pub converted: usize,
    pub copied: usize,
}

impl MirrorReport {
    pub fn files(&self) -> usize {
        self.converted + self.copied
    }
}
