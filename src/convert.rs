use crate::error::ConvertError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Mode given to rewritten markdown files on Unix
pub const DOCUMENT_MODE: u32 = 0o644;

/// Stream `src` into `dst` (created or truncated), then give `dst` the
/// permission bits of `src`. Returns the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, ConvertError> {
    let mut reader = File::open(src).map_err(|source| ConvertError::OpenSource {
        path: src.to_path_buf(),
        source,
    })?;
    let mut writer = File::create(dst).map_err(|source| ConvertError::CreateDestination {
        path: dst.to_path_buf(),
        source,
    })?;

    let bytes = match io::copy(&mut reader, &mut writer) {
        Ok(bytes) => bytes,
        Err(source) => {
            return Err(ConvertError::CopyContents {
                path: src.to_path_buf(),
                source,
            });
        }
    };

    // Close both handles before touching the mode.
    drop(reader);
    drop(writer);

    let permissions = fs::metadata(src)
        .map_err(|source| ConvertError::StatSource {
            path: src.to_path_buf(),
            source,
        })?
        .permissions();
    fs::set_permissions(dst, permissions).map_err(|source| ConvertError::SetPermissions {
        path: dst.to_path_buf(),
        source,
    })?;

    Ok(bytes)
}

/// Write the bytes of `src` unchanged to `dst` as a fresh file.
///
/// Nothing is parsed or escaped: the document is the markdown text under a
/// new name. Returns the number of bytes written.
pub fn rewrite_markdown_as_text(src: &Path, dst: &Path) -> Result<u64, ConvertError> {
    let content = fs::read(src).map_err(|source| ConvertError::ReadMarkdown {
        path: src.to_path_buf(),
        source,
    })?;

    write_document(dst, &content).map_err(|source| ConvertError::WriteDocument {
        path: dst.to_path_buf(),
        source,
    })?;

    Ok(content.len() as u64)
}

fn write_document(dst: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(DOCUMENT_MODE);
    }
    let mut file = options.open(dst)?;
    file.write_all(content)?;
    file.flush()
}
