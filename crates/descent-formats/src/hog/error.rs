//! Error types for the HOG container format

use thiserror::Error;

/// Errors that can occur when reading HOG containers
#[derive(Debug, Error)]
pub enum HogError {
    /// Invalid magic bytes (expected "DHF")
    #[error("Invalid magic: expected 'DHF', got {0:?}")]
    InvalidMagic([u8; 3]),

    /// Container is too short to hold the magic
    #[error("Truncated data: expected {expected} bytes, got {actual} bytes")]
    TruncatedData {
        /// Expected minimum size
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// An entry declares more payload than the container holds
    #[error(
        "Truncated input: entry '{entry}' at offset {offset} declares {declared} bytes, only {available} available"
    )]
    TruncatedInput {
        /// Name of the entry whose payload is cut short
        entry: String,
        /// Offset of the payload within the container
        offset: u64,
        /// Size from the entry header
        declared: u64,
        /// Bytes actually available
        available: u64,
    },

    /// Binary read error in a fixed-layout header
    #[error("Binary parsing error: {0}")]
    BinRead(String),

    /// IO error while streaming a container
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for HogError {
    fn from(e: binrw::Error) -> Self {
        Self::BinRead(e.to_string())
    }
}

/// Result type alias for HOG operations
pub type Result<T> = std::result::Result<T, HogError>;
