//! Directory to archive compression
//!
//! Walks a folder recursively and stores every regular file in a fresh zip
//! archive named after the folder. Items that disappear or cannot be read
//! during the walk are logged and skipped; running out of memory or file
//! descriptors stops the run.

use crate::archive::{ArchiveWriter, ARCHIVE_EXTENSION};
use crate::error::{InchError, Result};
use crate::file;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Names starting with this character are not archived or descended into
pub const HIDDEN_MARKER: char = '.';

/// What to do when a single file cannot be added to the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddFailurePolicy {
    /// Log the failure and keep compressing
    #[default]
    Skip,
    /// Stop the whole run
    Abort,
}

#[derive(Debug, Clone, Default)]
pub struct CompressorOptions {
    /// Directory to place the archive in, instead of beside the folder
    pub archive_dir: Option<PathBuf>,
    pub add_failure: AddFailurePolicy,
}

/// A walk item left out of the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of compressing a folder
#[derive(Debug, Clone)]
pub struct CompressedArchive {
    /// Location of the written archive
    pub path: PathBuf,
    /// Entry names stored in the archive
    pub entries: Vec<String>,
    pub skipped: Vec<SkippedItem>,
}

/// Archive path for `folder`: the folder path with `.zip` appended, or the
/// folder's basename plus `.zip` inside `archive_dir`.
pub fn archive_path_for(folder: &Path, archive_dir: Option<&Path>) -> Result<PathBuf> {
    // Component iteration drops the trailing separator
    let normalized = folder.components().as_path();
    let basename = normalized
        .file_name()
        .ok_or_else(|| InchError::InvalidName(folder.display().to_string()))?;

    let mut file_name = basename.to_os_string();
    file_name.push(".");
    file_name.push(ARCHIVE_EXTENSION);

    Ok(match archive_dir {
        Some(dir) => dir.join(file_name),
        None => normalized.with_file_name(file_name),
    })
}

/// Compresses a directory tree into a single archive
#[derive(Debug, Clone, Default)]
pub struct DirectoryCompressor {
    options: CompressorOptions,
}

impl DirectoryCompressor {
    pub fn new(options: CompressorOptions) -> Self {
        Self { options }
    }

    /// Compress `folder` into a new archive, replacing any previous one.
    pub fn compress<P: AsRef<Path>>(&self, folder: P) -> Result<CompressedArchive> {
        let folder = folder.as_ref();

        match fs::metadata(folder) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(InchError::NotADirectory(folder.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(InchError::NotADirectory(folder.to_path_buf()))
            }
            Err(e) => return Err(InchError::Io(e)),
        }

        let archive_path = archive_path_for(folder, self.options.archive_dir.as_deref())?;
        if file::remove_if_exists(&archive_path)? {
            debug!(path = %archive_path.display(), "removed previous archive");
        }

        let mut writer = ArchiveWriter::create(&archive_path)?;
        let mut skipped = Vec::new();

        let walker = WalkDir::new(folder)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for item in walker {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    skipped.push(classify_walk_error(folder, err)?);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry_name(folder, entry.path()) else {
                warn!(path = %entry.path().display(), "outside of the compressed folder; skipping");
                skipped.push(SkippedItem {
                    path: entry.path().to_path_buf(),
                    reason: "path is outside of the compressed folder".to_string(),
                });
                continue;
            };

            match writer.add_entry_from_disk(&name, entry.path()) {
                Ok(()) => debug!(entry = %name, "added"),
                Err(InchError::FileNotFound(path)) => {
                    warn!(path = %path.display(), "file vanished during compression; skipping");
                    skipped.push(SkippedItem {
                        path,
                        reason: "file vanished".to_string(),
                    });
                }
                Err(InchError::Io(e)) if is_resource_exhaustion(&e) => {
                    return Err(InchError::ResourceExhausted {
                        path: entry.path().to_path_buf(),
                        source: e,
                    });
                }
                Err(InchError::Io(e)) => {
                    warn!(path = %entry.path().display(), error = %e, "cannot read file; skipping");
                    skipped.push(SkippedItem {
                        path: entry.path().to_path_buf(),
                        reason: e.to_string(),
                    });
                }
                Err(e) if !e.is_fatal() && self.options.add_failure == AddFailurePolicy::Skip => {
                    warn!(entry = %name, error = %e, "cannot add entry; skipping");
                    skipped.push(SkippedItem {
                        path: entry.path().to_path_buf(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let entries: Vec<String> = writer.entry_names().map(str::to_string).collect();
        writer.finalize()?;

        info!(
            folder = %folder.display(),
            archive = %archive_path.display(),
            entries = entries.len(),
            skipped = skipped.len(),
            "compressed folder"
        );

        Ok(CompressedArchive {
            path: archive_path,
            entries,
            skipped,
        })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with(HIDDEN_MARKER))
        .unwrap_or(false)
}

/// Entry name for `path`: its location relative to `root`, forward slashes
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Decide whether a walk error skips one item or ends the run
fn classify_walk_error(root: &Path, err: walkdir::Error) -> Result<SkippedItem> {
    let path = err.path().unwrap_or(root).to_path_buf();

    if let Some(io_err) = err.io_error() {
        if is_resource_exhaustion(io_err) {
            let source = io::Error::new(io_err.kind(), io_err.to_string());
            return Err(InchError::ResourceExhausted { path, source });
        }
    }

    // The root itself could not be listed; there is nothing to compress
    if err.depth() == 0 {
        return Err(InchError::Io(err.into()));
    }

    warn!(path = %path.display(), error = %err, "cannot walk item; skipping");
    Ok(SkippedItem {
        path,
        reason: err.to_string(),
    })
}

/// Out of memory or out of file descriptors
fn is_resource_exhaustion(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::OutOfMemory {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(
            err.raw_os_error(),
            Some(libc::EMFILE) | Some(libc::ENFILE) | Some(libc::ENOMEM)
        )
    }

    #[cfg(not(unix))]
    {
        false
    }
}
