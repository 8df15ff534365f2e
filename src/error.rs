use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for inch operations
pub type Result<T> = std::result::Result<T, InchError>;

/// Unified error type for all inch operations
#[derive(Debug, Error)]
pub enum InchError {
    // Archive errors
    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),

    // Filesystem errors
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Resource exhausted while reading {}: {source}", .path.display())]
    ResourceExhausted {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Naming errors
    #[error("Cannot derive an identifier from {0:?}")]
    InvalidName(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    TomlError(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl InchError {
    /// Whether the error must stop the whole run.
    ///
    /// Soft errors are the ones a directory walk logs and skips: a single
    /// entry that cannot be added, or a file that vanished mid-walk.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            InchError::InvalidEntryName(_) | InchError::FileNotFound(_)
        )
    }
}

impl From<zip::result::ZipError> for InchError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => InchError::Io(e),
            other => InchError::Archive(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for InchError {
    fn from(err: toml::de::Error) -> Self {
        InchError::TomlError(err.to_string())
    }
}

impl From<toml::ser::Error> for InchError {
    fn from(err: toml::ser::Error) -> Self {
        InchError::TomlError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_errors_are_not_fatal() {
        assert!(!InchError::InvalidEntryName("../x".into()).is_fatal());
        assert!(!InchError::FileNotFound(PathBuf::from("gone.png")).is_fatal());
        assert!(InchError::Archive("invalid Zip archive".into()).is_fatal());
        assert!(InchError::Config("empty output path".into()).is_fatal());
    }

    #[test]
    fn test_zip_io_error_maps_to_io() {
        let err: InchError =
            zip::result::ZipError::Io(io::Error::new(io::ErrorKind::Other, "disk")).into();
        assert!(matches!(err, InchError::Io(_)));

        let err: InchError = zip::result::ZipError::InvalidArchive("bad").into();
        assert!(matches!(err, InchError::Archive(_)));
    }
}
