//! Command-line front end for Descent 1 HOG files
//!
//! This library provides the core functionality for the `descent` binary:
//! configuration, subcommand handlers and output file naming.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use commands::run;
pub use config::{CliConfig, Commands, LogLevel};
pub use error::{ConfigError, OutputNameError};
