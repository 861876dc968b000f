//! Subcommand handlers.
//!
//! Each handler works on a parsed [`HogArchive`] and writes its report to the
//! writer it is given, so the binary passes standard output and tests pass a
//! buffer.

pub mod dump;
pub mod export;
pub mod extract;
pub mod list;
pub mod text;

use crate::config::{CliConfig, Commands};
use crate::error::ConfigError;
use anyhow::{Context, Result};
use descent_formats::hog::HogArchive;
use std::io::Write;
use std::path::Path;

/// Read the HOG file and run the configured subcommand
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let data = load_input(&config.hog, config.max_input_bytes)?;
    let archive = HogArchive::parse(&data)
        .with_context(|| format!("{} is not a HOG file", config.hog.display()))?;

    tracing::info!(path = %config.hog.display(), size = data.len(), "loaded HOG file");

    match &config.command {
        Commands::List => list::handle(&archive, out),
        Commands::Export {
            entry,
            vertices_only,
            output,
        } => export::handle(&archive, entry, *vertices_only, output.as_deref(), out),
        Commands::ExportAll {
            output,
            vertices_only,
        } => export::handle_all(&archive, &output.output_dir, *vertices_only, out),
        Commands::Text { output } => text::handle(&archive, &output.output_dir, out),
        Commands::Extract { output } => extract::handle(&archive, &output.output_dir, out),
        Commands::Dump { entry } => dump::handle(&archive, entry.as_deref(), out),
    }
}

/// Read a whole input file, refusing anything above `limit` bytes
pub fn load_input(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    if size > limit {
        return Err(ConfigError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        }
        .into());
    }
    std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Create the output directory when it does not exist yet
fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))
}
