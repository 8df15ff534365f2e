//! Append-only byte buffer with a read cursor
//!
//! Used both as the sink that generated source text accumulates in and as a
//! cursor-based view over loaded file contents.

use std::ffi::CString;
use std::fmt;

/// Growable byte container with a read cursor.
///
/// Appends always go to the end; the cursor only moves through reads and
/// [`ByteBuffer::seek`]. The cursor never exceeds the length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    cursor: usize,
}

impl ByteBuffer {
    /// Create an empty buffer without allocating
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    ///
    /// A hint of 0 defers allocation to the first append.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Wrap existing bytes, cursor at the start
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Append raw bytes
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append UTF-8 text
    pub fn append_str(&mut self, text: &str) {
        self.append(text.as_bytes());
    }

    /// Append the full contents of another buffer
    pub fn merge(&mut self, other: &ByteBuffer) {
        self.append(&other.data);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Accumulated bytes as text, if they are valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// NUL-terminated copy of the contents.
    ///
    /// Stops at the first interior NUL, matching how C would read it.
    pub fn to_c_string(&self) -> CString {
        let end = self
            .data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.data.len());
        // No NUL remains in data[..end]
        CString::new(&self.data[..end]).unwrap_or_default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the buffer length
    pub fn seek(&mut self, pos: usize) {
        self.cursor = pos.min(self.data.len());
    }

    /// Bytes left between the cursor and the end
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.cursor).copied()
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.cursor += 1;
        Some(byte)
    }

    /// Read until `delimiter` or `max_len` bytes, whichever comes first.
    ///
    /// The delimiter itself is left under the cursor.
    pub fn read_upto(&mut self, delimiter: u8, max_len: usize) -> &[u8] {
        let start = self.cursor;
        let window = &self.data[start..];
        let limit = window.len().min(max_len);
        let len = window[..limit]
            .iter()
            .position(|&b| b == delimiter)
            .unwrap_or(limit);
        self.cursor += len;
        &self.data[start..start + len]
    }
}

impl fmt::Write for ByteBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}
