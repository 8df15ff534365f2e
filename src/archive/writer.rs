use crate::archive::format::{normalize_entry_name, select_compression};
use crate::archive::reader::{ArchiveReader, EntryLookup};
use crate::error::{InchError, Result};
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Entry waiting to be written at finalization
struct StagedEntry {
    data: Vec<u8>,
    compression: CompressionMethod,
}

/// Archive writer for creating or updating .zip files
///
/// Entries are staged in memory and written in one pass by
/// [`ArchiveWriter::finalize`], so adding a name twice keeps only the last
/// payload.
pub struct ArchiveWriter {
    path: PathBuf,
    entries: BTreeMap<String, StagedEntry>,
}

impl ArchiveWriter {
    /// Start a new, empty archive at `path`. Any existing file is replaced on finalize.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            entries: BTreeMap::new(),
        })
    }

    /// Open the archive at `path` for update, or start a fresh one if absent.
    ///
    /// Existing entries are carried over. A file that is present but not a
    /// readable archive is an error; a zero-length file counts as absent.
    pub fn create_or_open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut writer = Self::create(path)?;

        let existing = match std::fs::metadata(path) {
            Ok(meta) => meta.len() > 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(InchError::Io(e)),
        };

        if existing {
            let mut reader = ArchiveReader::open(path)?;
            for name in reader.entry_names() {
                let data = match reader.read_entry(&name)? {
                    EntryLookup::Found(data) => data,
                    EntryLookup::Empty => Vec::new(),
                    EntryLookup::NotFound => continue,
                };
                let compression = select_compression(&name, data.len());
                writer.entries.insert(name, StagedEntry { data, compression });
            }
            debug!(
                path = %path.display(),
                entries = writer.entries.len(),
                "opened existing archive"
            );
        }

        Ok(writer)
    }

    /// Destination path of the archive
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of staged entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Names of the staged entries, in archive order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        normalize_entry_name(name)
            .map(|n| self.entries.contains_key(&n))
            .unwrap_or(false)
    }

    /// Add an entry with automatic compression selection, replacing any entry of the same name
    pub fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let compression = select_compression(name, data.len());
        self.add_entry_with_compression(name, data, compression)
    }

    /// Add an entry with a specific compression method
    pub fn add_entry_with_compression(
        &mut self,
        name: &str,
        data: &[u8],
        compression: CompressionMethod,
    ) -> Result<()> {
        let normalized = normalize_entry_name(name)?;

        let replaced = self
            .entries
            .insert(
                normalized.clone(),
                StagedEntry {
                    data: data.to_vec(),
                    compression,
                },
            )
            .is_some();

        debug!(entry = %normalized, bytes = data.len(), replaced, "staged entry");
        Ok(())
    }

    /// Add an entry read from disk
    pub fn add_entry_from_disk(&mut self, name: &str, disk_path: &Path) -> Result<()> {
        let data = crate::file::load(disk_path)?;
        self.add_entry(name, &data)
    }

    /// Write all staged entries to the destination path.
    ///
    /// The archive is built in a temporary file beside the destination and
    /// moved into place, so a failed write never leaves a truncated archive.
    pub fn finalize(self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let temp = NamedTempFile::new_in(&dir)?;
        let mut zip = ZipWriter::new(BufWriter::new(temp));

        for (name, entry) in &self.entries {
            // Fixed timestamp keeps archives of identical folders identical
            let options = FileOptions::default()
                .compression_method(entry.compression)
                .last_modified_time(DateTime::default())
                .unix_permissions(0o644);
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&entry.data)?;
        }

        let mut buffered = zip.finish()?;
        buffered.flush()?;
        let temp = buffered.into_inner().map_err(|e| e.into_error())?;
        temp.persist(&self.path).map_err(|e| InchError::Io(e.error))?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "finalized archive");
        Ok(())
    }
}
