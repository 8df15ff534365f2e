use crate::error::{InchError, Result};
use zip::CompressionMethod;

/// Threshold below which entries are stored rather than deflated (4KB)
pub const MIN_COMPRESSION_SIZE: usize = 4096;

/// Longest entry name the zip format can record
pub const MAX_ENTRY_NAME_LENGTH: usize = u16::MAX as usize;

/// Extension appended to a folder name to name its archive
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Normalize an entry name to forward slashes and reject unsafe names.
///
/// Empty names, absolute paths, drive prefixes and `..` components are
/// refused; `.` components are dropped.
pub fn normalize_entry_name(name: &str) -> Result<String> {
    let replaced = name.replace('\\', "/");

    if replaced.starts_with('/') || has_drive_prefix(&replaced) {
        return Err(InchError::InvalidEntryName(name.to_string()));
    }

    let mut parts = Vec::new();
    for part in replaced.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(InchError::InvalidEntryName(name.to_string())),
            other => parts.push(other),
        }
    }

    let normalized = parts.join("/");
    if normalized.is_empty() || normalized.len() > MAX_ENTRY_NAME_LENGTH {
        return Err(InchError::InvalidEntryName(name.to_string()));
    }
    Ok(normalized)
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Choose how an entry is stored, based on its name and size
pub fn select_compression(name: &str, size: usize) -> CompressionMethod {
    // Don't compress small files
    if size < MIN_COMPRESSION_SIZE {
        return CompressionMethod::Stored;
    }

    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Already compressed formats
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "ogg" | "mp3" | "mp4" | "zip" | "gz"
        | "bz2" | "7z" => CompressionMethod::Stored,
        _ => CompressionMethod::Deflated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_entry_name() {
        assert_eq!(normalize_entry_name("images/a.png").unwrap(), "images/a.png");
        assert_eq!(normalize_entry_name("images\\a.png").unwrap(), "images/a.png");
        assert_eq!(normalize_entry_name("./images//a.png").unwrap(), "images/a.png");
    }

    #[test]
    fn test_normalize_rejects_traversal() {
        for name in ["", "/", "/etc/passwd", "../../etc/passwd", "a/../b", "C:\\Windows", "."] {
            assert!(
                matches!(normalize_entry_name(name), Err(InchError::InvalidEntryName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_select_compression() {
        assert_eq!(select_compression("a.txt", 10), CompressionMethod::Stored);
        assert_eq!(select_compression("a.txt", 8192), CompressionMethod::Deflated);
        assert_eq!(select_compression("a.PNG", 8192), CompressionMethod::Stored);
        assert_eq!(select_compression("noext", 8192), CompressionMethod::Deflated);
    }
}
