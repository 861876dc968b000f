//! Error types for the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The HOG path does not exist
    #[error("HOG file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The HOG path exists but is not a regular file
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The input size limit is unusable
    #[error("Invalid input size limit: {0} (must be greater than zero)")]
    InvalidLimit(u64),

    /// The HOG file is larger than the configured limit
    #[error("{} is {size} bytes, above the limit of {limit} bytes", path.display())]
    InputTooLarge {
        /// Path of the input
        path: PathBuf,
        /// Actual size
        size: u64,
        /// Configured limit
        limit: u64,
    },
}

/// Entry names that cannot be used as output file names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputNameError {
    /// The name is empty
    #[error("Entry name is empty")]
    Empty,

    /// The name contains a path separator or a control character
    #[error("Entry name '{0}' contains a path separator or control character")]
    InvalidCharacter(String),

    /// The name refers to the current or parent directory
    #[error("Entry name '{0}' refers to a directory")]
    Reserved(String),
}
