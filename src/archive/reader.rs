use crate::error::{InchError, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// Outcome of looking an entry up by name.
///
/// Missing and empty entries are ordinary outcomes, not errors; only a
/// corrupt archive or a failed read is reported through `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLookup {
    /// Entry exists and has content
    Found(Vec<u8>),
    /// Entry exists but holds zero bytes
    Empty,
    /// No entry with that name
    NotFound,
}

impl EntryLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, EntryLookup::Found(_))
    }

    /// Content of the entry, treating an empty entry as zero bytes
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            EntryLookup::Found(data) => Some(data),
            EntryLookup::Empty => Some(Vec::new()),
            EntryLookup::NotFound => None,
        }
    }
}

/// Reader over an archive held entirely in memory
pub struct ArchiveReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    source_len: u64,
}

impl ArchiveReader {
    /// Open archive bytes that were already loaded into memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let source_len = bytes.len() as u64;
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| match e {
            ZipError::Io(io) => InchError::Archive(format!("unreadable archive: {}", io)),
            other => InchError::Archive(other.to_string()),
        })?;
        Ok(Self { archive, source_len })
    }

    /// Load an archive file and open it from memory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = crate::file::load(path)?;
        Self::from_bytes(bytes)
    }

    /// Number of entries in the archive, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Names of all file entries
    pub fn entry_names(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    /// Check if a file entry exists
    pub fn contains(&self, name: &str) -> bool {
        let normalized = name.replace('\\', "/");
        self.archive.file_names().any(|n| n == normalized)
    }

    /// Read an entry's bytes by name
    pub fn read_entry(&mut self, name: &str) -> Result<EntryLookup> {
        let normalized = name.replace('\\', "/");

        let mut entry = match self.archive.by_name(&normalized) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(EntryLookup::NotFound),
            Err(e) => return Err(e.into()),
        };

        if entry.is_dir() {
            return Ok(EntryLookup::NotFound);
        }

        // Declared sizes are untrusted; never reserve more than the archive holds
        let mut data = Vec::with_capacity(entry.size().min(self.source_len) as usize);
        // CRC is verified once the entry has been read to the end
        entry
            .read_to_end(&mut data)
            .map_err(|e| InchError::Archive(format!("failed to read {}: {}", normalized, e)))?;

        if data.is_empty() {
            Ok(EntryLookup::Empty)
        } else {
            Ok(EntryLookup::Found(data))
        }
    }
}

/// Read a named entry out of archive bytes held in memory
pub fn read_entry(archive_bytes: &[u8], name: &str) -> Result<EntryLookup> {
    ArchiveReader::from_bytes(archive_bytes.to_vec())?.read_entry(name)
}
