#![no_main]

use inch_rs::{ArchiveReader, EntryLookup};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Shorter than an end record; cannot be an archive
    if data.len() < 22 {
        return;
    }

    let mut reader = match ArchiveReader::from_bytes(data.to_vec()) {
        Ok(r) => r,
        Err(_) => return,
    };

    for name in reader.entry_names() {
        match reader.read_entry(&name) {
            Ok(EntryLookup::Found(bytes)) => assert!(!bytes.is_empty()),
            Ok(EntryLookup::Empty) | Ok(EntryLookup::NotFound) | Err(_) => {}
        }
    }

    let _ = reader.len();
    let _ = reader.contains("");
    let _ = reader.contains("/");
    let _ = reader.read_entry("../../../etc/passwd");
});
