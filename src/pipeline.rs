//! Folder to generated source, end to end
//!
//! One run derives the symbol name, compresses the folder, loads the archive
//! bytes, removes the intermediate archive, encodes the bytes and saves the
//! generated file. An unusable name fails before any archive is written.
//! Any other error ends the run; the output path is left in an unspecified
//! state.

use crate::buffer::ByteBuffer;
use crate::compressor::{DirectoryCompressor, SkippedItem};
use crate::config::InchConfig;
use crate::encoder::{NoProgress, ProgressSink};
use crate::error::Result;
use crate::{file, naming};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Generated source for one run, before it is saved
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Identifier the accessors are named after
    pub symbol: String,
    pub text: ByteBuffer,
    pub output_path: PathBuf,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub symbol: String,
    pub output_path: PathBuf,
    /// Size of the embedded archive in bytes
    pub archive_size: u64,
    /// Entries stored in the embedded archive
    pub entries: Vec<String>,
    pub skipped: Vec<SkippedItem>,
    /// Declarations to paste into a header
    pub declarations: Vec<String>,
}

pub struct EmbeddingPipeline {
    config: InchConfig,
}

impl EmbeddingPipeline {
    pub fn new(config: InchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InchConfig {
        &self.config
    }

    /// Run without progress output
    pub fn run<P: AsRef<Path>>(&self, folder: P, name_source: &str) -> Result<PipelineOutcome> {
        self.run_with_progress(folder, name_source, &mut NoProgress)
    }

    /// Embed `folder`, naming the accessors after `name_source`.
    pub fn run_with_progress<P: AsRef<Path>>(
        &self,
        folder: P,
        name_source: &str,
        progress: &mut dyn ProgressSink,
    ) -> Result<PipelineOutcome> {
        let folder = folder.as_ref();
        self.config.validate()?;
        let symbol = derive_symbol(name_source)?;

        let compressor = DirectoryCompressor::new(self.config.compressor_options());
        let archive = compressor.compress(folder)?;

        info!(archive = %archive.path.display(), "loading archive");
        let archive_bytes = file::load(&archive.path)?;
        if !self.config.keep_archive {
            file::remove_if_exists(&archive.path)?;
            debug!(archive = %archive.path.display(), "removed intermediate archive");
        }

        let output = self.encode(symbol, &archive_bytes, progress);
        file::save(&output.output_path, output.text.as_bytes())?;
        info!(
            output = %output.output_path.display(),
            symbol = %output.symbol,
            bytes = archive_bytes.len(),
            "saved generated source"
        );

        let declarations = self.config.encoder().declarations(&output.symbol);

        Ok(PipelineOutcome {
            symbol: output.symbol,
            output_path: output.output_path,
            archive_size: archive_bytes.len() as u64,
            entries: archive.entries,
            skipped: archive.skipped,
            declarations,
        })
    }

    /// Derive the symbol and encode `data` without touching the filesystem
    pub fn generate(
        &self,
        data: &[u8],
        name_source: &str,
        progress: &mut dyn ProgressSink,
    ) -> Result<GeneratedOutput> {
        let symbol = derive_symbol(name_source)?;
        Ok(self.encode(symbol, data, progress))
    }

    fn encode(
        &self,
        symbol: String,
        data: &[u8],
        progress: &mut dyn ProgressSink,
    ) -> GeneratedOutput {
        let mut text = ByteBuffer::with_capacity(data.len() * 4 + 160);
        self.config.encoder().encode(&symbol, data, &mut text, progress);

        GeneratedOutput {
            symbol,
            text,
            output_path: self.config.output_path.clone(),
        }
    }
}

fn derive_symbol(name_source: &str) -> Result<String> {
    let symbol = naming::derive_name(name_source)?;
    debug!(symbol = %symbol, source = name_source, "derived symbol name");
    Ok(symbol)
}
