//! Inch-rs: embed a resource folder into a compilable C source file
//!
//! The folder is packed into a zip archive and the archive bytes are written
//! out as a C literal with accessor functions:
//! - Directory compression into a single archive (`compressor`)
//! - In-memory archive reading with found/empty/not-found lookups (`archive`)
//! - Symbol name derivation from paths (`naming`)
//! - Hex-string and decimal-array literal encoding (`encoder`)
//! - The end-to-end run (`pipeline`)
//!
//! # Example
//!
//! ```no_run
//! use inch_rs::{EmbeddingPipeline, InchConfig};
//!
//! let pipeline = EmbeddingPipeline::new(InchConfig::default());
//! let outcome = pipeline.run("media", "media")?;
//!
//! // void* media_data(void);
//! // uint64_t media_size(void);
//! for line in &outcome.declarations {
//!     println!("{}", line);
//! }
//! # Ok::<(), inch_rs::error::InchError>(())
//! ```

// Core modules
pub mod archive;
pub mod buffer;
pub mod compressor;
pub mod config;
pub mod encoder;
pub mod error;
pub mod file;
pub mod naming;
pub mod pipeline;

// Re-export commonly used types
pub use archive::{read_entry, ArchiveReader, ArchiveWriter, EntryLookup};
pub use buffer::ByteBuffer;
pub use compressor::{
    archive_path_for, AddFailurePolicy, CompressedArchive, CompressorOptions, DirectoryCompressor,
    SkippedItem,
};
pub use config::{InchConfig, DEFAULT_OUTPUT_PATH};
pub use encoder::{
    DotProgress, Encoding, HexStyle, LiteralEncoder, LogProgress, NoProgress, PercentProgress,
    ProgressCadence, ProgressSink, DATA_SYMBOL, SIZE_SYMBOL,
};
pub use error::{InchError, Result};
pub use naming::derive_name;
pub use pipeline::{EmbeddingPipeline, GeneratedOutput, PipelineOutcome};
