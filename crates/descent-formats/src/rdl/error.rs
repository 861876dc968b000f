//! Error types for the RDL level format

use crate::cursor::CursorError;
use thiserror::Error;

/// Errors that can occur when decoding RDL levels
#[derive(Debug, Error)]
pub enum RdlError {
    /// Invalid signature (expected "LVLP")
    #[error("Invalid magic: expected 'LVLP', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Data is too short for the header, or a section offset points past the end
    #[error("Truncated input: expected {expected} bytes, got {actual} bytes")]
    TruncatedInput {
        /// Bytes needed
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// Header file size disagrees with the actual buffer length
    #[error("Size mismatch: header declares {declared} bytes, buffer holds {actual} bytes")]
    SizeMismatch {
        /// File size from the header
        declared: u32,
        /// Actual buffer length
        actual: usize,
    },

    /// The mine data section could not be decoded
    #[error("Malformed geometry at offset {offset} ({field}{}): {fault}", cube_suffix(.cube))]
    MalformedGeometry {
        /// Offset of the field being decoded
        offset: usize,
        /// Field being decoded
        field: &'static str,
        /// Index of the cube being decoded, if any
        cube: Option<usize>,
        /// What went wrong
        fault: GeometryFault,
    },

    /// Binary read error in the fixed header
    #[error("Binary parsing error: {0}")]
    BinRead(String),
}

fn cube_suffix(cube: &Option<usize>) -> String {
    cube.map(|index| format!(" of cube {index}"))
        .unwrap_or_default()
}

/// Cause of a [`RdlError::MalformedGeometry`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryFault {
    /// A decoded vertex or cube index exceeds its table
    #[error("index {index} out of range (table holds {bound})")]
    IndexOutOfRange {
        /// Decoded index
        index: i64,
        /// Table length
        bound: usize,
    },

    /// The field runs past the end of the buffer
    #[error(transparent)]
    OutOfBounds(#[from] CursorError),
}

impl From<binrw::Error> for RdlError {
    fn from(e: binrw::Error) -> Self {
        Self::BinRead(e.to_string())
    }
}

/// Result type alias for RDL operations
pub type Result<T> = std::result::Result<T, RdlError>;
