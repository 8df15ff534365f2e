//! Shared helpers for integration tests: literal decoders and folder fixtures

#![allow(dead_code)]

use inch_rs::ByteBuffer;
use std::fs;
use std::path::{Path, PathBuf};

/// Move the cursor just past the first occurrence of `marker`
fn seek_past(buf: &mut ByteBuffer, marker: &str) {
    let pos = buf
        .as_bytes()
        .windows(marker.len())
        .position(|w| w == marker.as_bytes())
        .unwrap_or_else(|| panic!("{:?} not found", marker));
    buf.seek(pos + marker.len());
}

/// Read up to `max_len` digits in `radix` and leave the cursor after them
fn read_number(buf: &mut ByteBuffer, delimiter: u8, max_len: usize, radix: u32) -> u8 {
    let start = buf.cursor();
    let digits: String = buf
        .read_upto(delimiter, max_len)
        .iter()
        .map(|&b| b as char)
        .take_while(|c| c.is_digit(radix))
        .collect();
    assert!(!digits.is_empty(), "no digits at offset {}", start);
    buf.seek(start + digits.len());
    u8::from_str_radix(&digits, radix).expect("byte value")
}

/// Parse the `inch_data` string literal of a hex-string file back into bytes
pub fn decode_hex_literal(text: &str) -> Vec<u8> {
    let mut buf = ByteBuffer::from_bytes(text.as_bytes().to_vec());
    seek_past(&mut buf, "inch_data[]=\"");

    let mut out = Vec::new();
    while buf.peek_byte() == Some(b'\\') {
        buf.read_byte();
        assert_eq!(buf.read_byte(), Some(b'x'), "every byte is escaped");
        out.push(read_number(&mut buf, b'\\', 2, 16));
    }
    assert_eq!(buf.read_byte(), Some(b'"'), "literal is closed");
    out
}

/// The declared `inch_size` of a hex-string file
pub fn declared_size(text: &str) -> u64 {
    let mut buf = ByteBuffer::from_bytes(text.as_bytes().to_vec());
    seek_past(&mut buf, "inch_size=");
    let digits = buf.read_upto(b';', 20);
    std::str::from_utf8(digits).unwrap().parse().expect("size is decimal")
}

/// Parse a `char <name>[]={...};` literal back into bytes
pub fn decode_decimal_array(text: &str) -> Vec<u8> {
    let mut buf = ByteBuffer::from_bytes(text.as_bytes().to_vec());
    seek_past(&mut buf, "[]={");

    let mut out = Vec::new();
    while buf.peek_byte() != Some(b'}') {
        if !out.is_empty() {
            assert_eq!(buf.read_byte(), Some(b','), "values are comma separated");
        }
        let start = buf.cursor();
        out.push(read_number(&mut buf, b',', 3, 10));
        let digits = &buf.as_bytes()[start..buf.cursor()];
        assert!(digits == b"0" || digits[0] != b'0', "no leading zeros: {:?}", digits);
    }
    assert_eq!(buf.remaining(), 3, "array ends with `}};` and a newline");
    out
}

/// Create `root/<name>` holding the given relative files
pub fn make_folder(root: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let folder = root.join(name);
    fs::create_dir_all(&folder).unwrap();
    for (relative, data) in files {
        let path = folder.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
    }
    folder
}
