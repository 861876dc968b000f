//! Command-line configuration.
//!
//! Configuration can be provided via:
//! - CLI arguments (`--log-level`, `--max-input-bytes`, the HOG path, ...)
//! - Environment variables (`DESCENT_HOG`, `DESCENT_OUTPUT_DIR`,
//!   `DESCENT_MAX_INPUT_BYTES`, `DESCENT_LOG_LEVEL`)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use descent_cli::CliConfig;
//!
//! let config = CliConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading {}", config.hog.display());
//! ```

use crate::error::ConfigError;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Largest HOG file read by default (64 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// Level exported when `export` is given no entry name
pub const DEFAULT_LEVEL: &str = "level02.rdl";

/// Configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "descent",
    about = "List, extract and convert the contents of Descent 1 HOG files",
    version
)]
pub struct CliConfig {
    /// Set the logging level
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "DESCENT_LOG_LEVEL",
        default_value = "warn"
    )]
    pub log_level: LogLevel,

    /// Refuse HOG files larger than this many bytes
    #[arg(
        long,
        global = true,
        env = "DESCENT_MAX_INPUT_BYTES",
        default_value_t = DEFAULT_MAX_INPUT_BYTES
    )]
    pub max_input_bytes: u64,

    /// Path to the HOG file
    #[arg(env = "DESCENT_HOG")]
    pub hog: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Logging verbosity
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-entry and per-cube events
    Trace,
    /// Decoding summaries
    Debug,
    /// Progress messages
    Info,
    /// Recoverable problems only
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Directory that generated files are written to
#[derive(Debug, Clone, Args)]
pub struct OutputDir {
    /// Directory to write files into
    #[arg(short = 'd', long, env = "DESCENT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// Subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List every entry with its size
    List,

    /// Export one level as an ASCII PLY mesh
    Export {
        /// Level entry to export (matched ignoring case)
        #[arg(short, long, default_value = DEFAULT_LEVEL)]
        entry: String,

        /// Write only the vertex table
        #[arg(long)]
        vertices_only: bool,

        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every level as `<name>.ply`
    ExportAll {
        #[command(flatten)]
        output: OutputDir,

        /// Write only the vertex tables
        #[arg(long)]
        vertices_only: bool,
    },

    /// Descramble every TXB entry into `<name>.txt`
    Text {
        #[command(flatten)]
        output: OutputDir,
    },

    /// Write every entry out unchanged
    Extract {
        #[command(flatten)]
        output: OutputDir,
    },

    /// Print decoded level contents for debugging
    Dump {
        /// Only dump this level (matched ignoring case)
        #[arg(short, long)]
        entry: Option<String>,
    },
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The HOG file doesn't exist or is not a regular file
    /// - The input size limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hog.exists() {
            return Err(ConfigError::MissingInput(self.hog.clone()));
        }
        if !self.hog.is_file() {
            return Err(ConfigError::NotAFile(self.hog.clone()));
        }
        if self.max_input_bytes == 0 {
            return Err(ConfigError::InvalidLimit(self.max_input_bytes));
        }
        Ok(())
    }
}
