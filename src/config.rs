//! Run configuration
//!
//! Every field has a default matching the stock tool, so an empty file (or
//! no file at all) reproduces its behavior:
//!
//! ```toml
//! output_path = "src/resources.c"
//! encoding = "hex-string"
//! hex_style = "unpadded"
//! add_failure = "skip"
//! keep_archive = false
//!
//! [progress]
//! every_bytes = 20
//! ```

use crate::compressor::{AddFailurePolicy, CompressorOptions};
use crate::encoder::{Encoding, HexStyle, LiteralEncoder, ProgressCadence};
use crate::error::{InchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the generated source is written unless configured otherwise
pub const DEFAULT_OUTPUT_PATH: &str = "src/resources.c";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InchConfig {
    /// Generated source file
    pub output_path: PathBuf,

    pub encoding: Encoding,

    pub hex_style: HexStyle,

    /// Policy for files that cannot be added to the archive
    pub add_failure: AddFailurePolicy,

    /// Directory for the intermediate archive; beside the folder when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_dir: Option<PathBuf>,

    /// Keep the intermediate archive instead of deleting it after loading
    pub keep_archive: bool,

    // Kept last: it serializes as a table
    pub progress: ProgressCadence,
}

impl Default for InchConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            encoding: Encoding::default(),
            hex_style: HexStyle::default(),
            progress: ProgressCadence::default(),
            add_failure: AddFailurePolicy::default(),
            archive_dir: None,
            keep_archive: false,
        }
    }
}

impl InchConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = crate::file::load(path)?;
        let text = String::from_utf8(data)
            .map_err(|e| InchError::Config(format!("config is not UTF-8: {}", e)))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(InchError::Config("output_path is empty".to_string()));
        }

        let cadence = match self.progress {
            ProgressCadence::EveryBytes(n) | ProgressCadence::Dots(n) => n,
        };
        if cadence == 0 {
            return Err(InchError::Config("progress cadence must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Encoder described by this configuration
    pub fn encoder(&self) -> LiteralEncoder {
        LiteralEncoder::new(self.encoding)
            .hex_style(self.hex_style)
            .cadence(self.progress)
    }

    /// Compressor options described by this configuration
    pub fn compressor_options(&self) -> CompressorOptions {
        CompressorOptions {
            archive_dir: self.archive_dir.clone(),
            add_failure: self.add_failure,
        }
    }
}
