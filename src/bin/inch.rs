//! INCH: INclude C Header
//!
//! Embeds a resource folder into `src/resources.c` and prints the accessor
//! declarations to add to a header.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use inch_rs::{
    DotProgress, EmbeddingPipeline, Encoding, HexStyle, InchConfig, LogProgress, NoProgress,
    PercentProgress, ProgressCadence, ProgressSink,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
Generated accessors:
    void* <name>_data(void);
    uint64_t <name>_size(void);";

/// INclude C Header: embed a folder in a C source file
#[derive(Parser)]
#[command(name = "inch")]
#[command(version, long_about = None, after_help = AFTER_HELP)]
struct Cli {
    /// Folder to embed
    folder: PathBuf,

    /// Name the accessors are derived from (defaults to the folder name)
    #[arg(short, long)]
    name: Option<String>,

    /// Generated source file [default: src/resources.c]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Literal encoding
    #[arg(short, long, value_enum)]
    encoding: Option<EncodingArg>,

    /// Always emit two hex digits per escape
    #[arg(long)]
    padded: bool,

    /// Keep the intermediate archive
    #[arg(long)]
    keep_archive: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print the declarations and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    HexString,
    DecimalArray,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::HexString => Encoding::HexString,
            EncodingArg::DecimalArray => Encoding::DecimalArray,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Print a parse error; real usage errors also list the generated accessors
fn usage_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    if err.use_stderr() {
        eprintln!("\n{}", AFTER_HELP);
    }
    ExitCode::from(err.exit_code() as u8)
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let name_source = cli.name.clone().unwrap_or_else(|| folder_name(&cli.folder));

    info!("INCH: INclude C Header v{}", env!("CARGO_PKG_VERSION"));
    info!(folder = %cli.folder.display(), output = %config.output_path.display(), "embedding");

    let mut progress: Box<dyn ProgressSink> = match (cli.quiet, config.progress) {
        (true, _) => Box::new(NoProgress),
        // Percentages go through the debug log instead of a progress line
        (false, _) if cli.verbose >= 2 => Box::new(LogProgress),
        (false, ProgressCadence::Dots(_)) => Box::new(DotProgress::stderr()),
        (false, ProgressCadence::EveryBytes(_)) => Box::new(PercentProgress::stderr()),
    };

    let pipeline = EmbeddingPipeline::new(config);
    let outcome = pipeline
        .run_with_progress(&cli.folder, &name_source, progress.as_mut())
        .with_context(|| format!("failed to embed {}", cli.folder.display()))?;

    for item in &outcome.skipped {
        warn!(path = %item.path.display(), reason = %item.reason, "not embedded");
    }
    info!(
        entries = outcome.entries.len(),
        bytes = outcome.archive_size,
        output = %outcome.output_path.display(),
        "complete"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in &outcome.declarations {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}

fn load_config(cli: &Cli) -> Result<InchConfig> {
    let mut config = match &cli.config {
        Some(path) => InchConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => InchConfig::default(),
    };

    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding.into();
    }
    if cli.padded {
        config.hex_style = HexStyle::Padded;
    }
    if cli.keep_archive {
        config.keep_archive = true;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Folder argument without trailing separators
fn folder_name(folder: &Path) -> String {
    folder.components().as_path().to_string_lossy().into_owned()
}
