mod format;
mod reader;
mod writer;

pub use format::{
    normalize_entry_name, select_compression, ARCHIVE_EXTENSION, MAX_ENTRY_NAME_LENGTH,
    MIN_COMPRESSION_SIZE,
};
pub use reader::{read_entry, ArchiveReader, EntryLookup};
pub use writer::ArchiveWriter;

use crate::error::Result;
use std::path::Path;

/// Store `data` under `name` inside the archive at `archive_path`.
///
/// The archive is created if missing; an existing entry with the same name
/// is overwritten.
pub fn add_entry<P: AsRef<Path>>(archive_path: P, name: &str, data: &[u8]) -> Result<()> {
    let mut writer = ArchiveWriter::create_or_open(archive_path)?;
    writer.add_entry(name, data)?;
    writer.finalize()
}
