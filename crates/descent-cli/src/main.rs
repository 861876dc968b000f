//! `descent` binary entry point.
//!
//! A thin wrapper around the descent-cli library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging on standard error
//! 3. Validates configuration
//! 4. Runs the subcommand against standard output

use anyhow::Result;
use descent_cli::CliConfig;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = CliConfig::from_args();

    // RUST_LOG wins over --log-level so individual modules can be traced
    let level = Level::from(config.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(hog = %config.hog.display(), command = ?config.command, "configuration loaded");

    config.validate()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    descent_cli::run(&config, &mut out)
}
