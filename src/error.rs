use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a conversion run.
///
/// I/O variants keep the offending path next to the underlying error so the
/// top level can print a single line that says what failed and where.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input directory does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("input path is not a directory: {}", .0.display())]
    InputNotDirectory(PathBuf),

    #[error("output directory is the input directory: {}", .0.display())]
    OutputIsInput(PathBuf),

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk input tree")]
    Walk(#[from] walkdir::Error),

    #[error("failed to open source file {}", path.display())]
    OpenSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create destination file {}", path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy contents of {}", path.display())]
    CopyContents {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read metadata of {}", path.display())]
    StatSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to set permissions on {}", path.display())]
    SetPermissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read markdown file {}", path.display())]
    ReadMarkdown {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write document {}", path.display())]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Path the failing operation was working on, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConvertError::InputNotFound(path)
            | ConvertError::InputNotDirectory(path)
            | ConvertError::OutputIsInput(path) => Some(path),
            ConvertError::CreateDir { path, .. }
            | ConvertError::OpenSource { path, .. }
            | ConvertError::CreateDestination { path, .. }
            | ConvertError::CopyContents { path, .. }
            | ConvertError::StatSource { path, .. }
            | ConvertError::SetPermissions { path, .. }
            | ConvertError::ReadMarkdown { path, .. }
            | ConvertError::WriteDocument { path, .. } => Some(path),
            ConvertError::Walk(err) => err.path(),
        }
    }
}
