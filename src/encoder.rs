//! Byte-to-source literal encoding
//!
//! Two encodings are supported:
//!
//! - [`Encoding::HexString`]: a `\xHH`-escaped string literal behind a fixed
//!   internal symbol, with `<name>_data()`/`<name>_size()` accessors.
//! - [`Encoding::DecimalArray`]: a `char <name>[]={...};` array of decimal
//!   byte values.
//!
//! # Example
//!
//! ```
//! use inch_rs::{ByteBuffer, Encoding, LiteralEncoder, NoProgress};
//!
//! let encoder = LiteralEncoder::new(Encoding::HexString);
//! let mut out = ByteBuffer::new();
//! encoder.encode("greeting", b"Hi", &mut out, &mut NoProgress);
//!
//! let text = out.as_str().unwrap();
//! assert!(text.contains(r#"static uint8_t inch_data[]="\x48\x69";static uint64_t inch_size=2;"#));
//! assert!(text.contains("void* greeting_data(void){return inch_data;}"));
//! ```

use crate::buffer::ByteBuffer;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;
use tracing::debug;

/// Internal symbol holding the escaped bytes
pub const DATA_SYMBOL: &str = "inch_data";

/// Internal symbol holding the byte count
pub const SIZE_SYMBOL: &str = "inch_size";

/// Literal form of the generated data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// `char <name>[]={72,105};`
    DecimalArray,
    /// `static uint8_t inch_data[]="\x48\x69";` plus accessors
    #[default]
    HexString,
}

/// Width of each `\x` escape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HexStyle {
    /// Shortest form, `\xA` for 10. Byte-compatible with existing generated files.
    #[default]
    Unpadded,
    /// Always two digits, `\x0A` for 10
    Padded,
}

/// How often the encoder reports progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressCadence {
    /// Report every `n` bytes
    EveryBytes(u64),
    /// Report about `n` times over the whole input
    Dots(u64),
}

impl Default for ProgressCadence {
    fn default() -> Self {
        ProgressCadence::EveryBytes(20)
    }
}

impl ProgressCadence {
    /// Bytes between two reports for an input of `total` bytes, at least 1
    pub fn interval(&self, total: u64) -> u64 {
        match *self {
            ProgressCadence::EveryBytes(n) => n.max(1),
            ProgressCadence::Dots(n) => (total / n.max(1)).max(1),
        }
    }
}

/// Receiver of encoding progress.
///
/// Sinks only observe; they never see or alter the encoded output.
pub trait ProgressSink {
    fn start(&mut self, _total: u64) {}

    fn advance(&mut self, done: u64, total: u64);

    fn finish(&mut self) {}
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&mut self, _done: u64, _total: u64) {}
}

/// Prints one dot per report, and a newline when done
pub struct DotProgress<W: Write> {
    writer: W,
}

impl<W: Write> DotProgress<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl DotProgress<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

// Progress output is cosmetic; write errors are ignored
impl<W: Write> ProgressSink for DotProgress<W> {
    fn advance(&mut self, _done: u64, _total: u64) {
        let _ = self.writer.write_all(b".");
        let _ = self.writer.flush();
    }

    fn finish(&mut self) {
        let _ = self.writer.write_all(b"\n");
        let _ = self.writer.flush();
    }
}

/// Rewrites a single `\r`-terminated percentage line, only when the whole
/// percent changes
pub struct PercentProgress<W: Write> {
    writer: W,
    last: Option<u64>,
}

impl<W: Write> PercentProgress<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last: None }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PercentProgress<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ProgressSink for PercentProgress<W> {
    fn advance(&mut self, done: u64, total: u64) {
        let percent = if total == 0 { 100 } else { done * 100 / total };
        if self.last == Some(percent) {
            return;
        }
        self.last = Some(percent);
        let _ = write!(self.writer, "\rencoding: {:3}%", percent);
        let _ = self.writer.flush();
    }

    fn finish(&mut self) {
        if self.last.is_some() {
            let _ = self.writer.write_all(b"\n");
            let _ = self.writer.flush();
        }
    }
}

/// Reports percentages through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn advance(&mut self, done: u64, total: u64) {
        let percent = if total == 0 {
            100.0
        } else {
            100.0 * done as f64 / total as f64
        };
        debug!(done, total, "encoding: {:.1}%", percent);
    }
}

/// Converts raw bytes into a compilable C literal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralEncoder {
    encoding: Encoding,
    hex_style: HexStyle,
    cadence: ProgressCadence,
}

impl LiteralEncoder {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn hex_style(mut self, hex_style: HexStyle) -> Self {
        self.hex_style = hex_style;
        self
    }

    pub fn cadence(mut self, cadence: ProgressCadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Append the literal for `bytes`, declared under `name`, to `out`
    pub fn encode(
        &self,
        name: &str,
        bytes: &[u8],
        out: &mut ByteBuffer,
        progress: &mut dyn ProgressSink,
    ) {
        let total = bytes.len() as u64;
        let interval = self.cadence.interval(total);

        progress.start(total);
        match self.encoding {
            Encoding::DecimalArray => {
                out.append_str(&format!("char {}[]={{", name));
                for (i, &byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        out.append(b",");
                    }
                    push_decimal(out, byte);
                    report(progress, i, interval, total);
                }
                out.append(b"};\n");
            }
            Encoding::HexString => {
                out.append_str(&format!(
                    "#include <stdint.h>\nstatic uint8_t {}[]=\"",
                    DATA_SYMBOL
                ));
                for (i, &byte) in bytes.iter().enumerate() {
                    push_hex_escape(out, byte, self.hex_style);
                    report(progress, i, interval, total);
                }
                out.append_str(&format!(
                    "\";static uint64_t {size}={total};\n\
                     void* {name}_data(void){{return {data};}}\n\
                     uint64_t {name}_size(void){{return {size};}}\n",
                    data = DATA_SYMBOL,
                    size = SIZE_SYMBOL,
                ));
            }
        }
        progress.finish();
    }

    /// Encode into a fresh buffer without progress reporting
    pub fn encode_to_buffer(&self, name: &str, bytes: &[u8]) -> ByteBuffer {
        let mut out = ByteBuffer::with_capacity(bytes.len() * 4 + 160);
        self.encode(name, bytes, &mut out, &mut NoProgress);
        out
    }

    /// Declarations a caller adds to its own header to use the generated file
    pub fn declarations(&self, name: &str) -> Vec<String> {
        match self.encoding {
            Encoding::DecimalArray => vec![format!("char {}[];", name)],
            Encoding::HexString => vec![
                format!("void* {}_data(void);", name),
                format!("uint64_t {}_size(void);", name),
            ],
        }
    }
}

#[inline]
fn report(progress: &mut dyn ProgressSink, index: usize, interval: u64, total: u64) {
    let done = index as u64 + 1;
    if done % interval == 0 {
        progress.advance(done, total);
    }
}

// Writing into a ByteBuffer cannot fail

/// Unsigned decimal, no leading zeros
fn push_decimal(out: &mut ByteBuffer, byte: u8) {
    let _ = write!(out, "{}", byte);
}

fn push_hex_escape(out: &mut ByteBuffer, byte: u8, style: HexStyle) {
    let _ = match style {
        HexStyle::Unpadded => write!(out, "\\x{:X}", byte),
        HexStyle::Padded => write!(out, "\\x{:02X}", byte),
    };
}
