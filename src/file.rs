//! Whole-file load and save helpers

use crate::error::{InchError, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Load a file into memory.
///
/// A missing file is reported as [`InchError::FileNotFound`] so callers can
/// tell it apart from other I/O failures.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(data) => {
            debug!(path = %path.display(), bytes = data.len(), "loaded file");
            Ok(data)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(InchError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(InchError::Io(e)),
    }
}

/// Replace the file at `path` with `data`, creating parent directories.
pub fn save<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(InchError::Config("output path is empty".to_string()));
    }

    remove_if_exists(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;

    debug!(path = %path.display(), bytes = data.len(), "saved file");
    Ok(())
}

/// Delete a file if present. Returns whether anything was removed.
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(InchError::Io(e)),
    }
}
