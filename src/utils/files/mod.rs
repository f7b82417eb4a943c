#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `path` through a temporary file in the same directory.
///
/// The destination is only replaced once the content is fully written and
/// flushed; on failure the temporary file is removed and `path` is untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), AppError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let io_error = |action: &str, err: std::io::Error| {
        AppError::with_source(
            ErrorCategory::IoError,
            format!("failed to {} {}: {}", action, path.display(), err),
            Box::new(err),
        )
    };

    let mut temp = NamedTempFile::new_in(directory).map_err(|err| io_error("stage", err))?;
    temp.write_all(content)
        .map_err(|err| io_error("write", err))?;
    temp.as_file_mut()
        .sync_all()
        .map_err(|err| io_error("flush", err))?;
    temp.persist(path)
        .map_err(|err| io_error("replace", err.error))?;
    Ok(())
}
