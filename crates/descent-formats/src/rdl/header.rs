//! Fixed 20-byte RDL level header

use crate::rdl::error::{RdlError, Result};
use binrw::BinRead;
use binrw::io::Cursor;

/// RDL level header
///
/// Binary layout (20 bytes, little-endian):
/// - Signature "LVLP" (4 bytes)
/// - Version (4 bytes)
/// - Mine data offset (4 bytes)
/// - Objects offset (4 bytes)
/// - Total file size (4 bytes)
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct LevelHeader {
    /// Signature, "LVLP" in valid levels
    pub signature: [u8; 4],

    /// Level format version
    pub version: u32,

    /// Offset of the mine data (vertices and cubes)
    pub mine_data_offset: u32,

    /// Offset of the objects section
    pub objects_offset: u32,

    /// Total file size
    pub file_size: u32,
}

impl LevelHeader {
    /// Level signature
    pub const MAGIC: [u8; 4] = *b"LVLP";

    /// Serialized size of the header
    pub const SIZE: usize = 20;

    /// Decode and validate the header of a level buffer
    ///
    /// Fails with [`RdlError::SizeMismatch`] when the declared file size does
    /// not match `data.len()`, which catches truncated and concatenated input.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            // Report a bad signature ahead of the length when we can see it
            if data.len() >= Self::MAGIC.len() && !data.starts_with(&Self::MAGIC) {
                let mut signature = [0u8; 4];
                signature.copy_from_slice(&data[..4]);
                return Err(RdlError::InvalidMagic(signature));
            }
            return Err(RdlError::TruncatedInput {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }

        let header = Self::read(&mut Cursor::new(data))?;
        header.validate(data.len())?;
        Ok(header)
    }

    /// Check the signature and declared sizes against a buffer length
    pub fn validate(&self, actual_len: usize) -> Result<()> {
        if self.signature != Self::MAGIC {
            return Err(RdlError::InvalidMagic(self.signature));
        }

        if self.file_size as usize != actual_len {
            return Err(RdlError::SizeMismatch {
                declared: self.file_size,
                actual: actual_len,
            });
        }

        // The mine data starts with a version byte and two counts
        let mine_header_end = (self.mine_data_offset as usize).saturating_add(5);
        if mine_header_end > actual_len {
            return Err(RdlError::TruncatedInput {
                expected: mine_header_end,
                actual: actual_len,
            });
        }

        Ok(())
    }

    /// Whether `data` looks like a level: signature present and the declared
    /// file size matches the buffer length
    pub fn is_valid(data: &[u8]) -> bool {
        if !data.starts_with(&Self::MAGIC) {
            return false;
        }
        data.len() >= Self::SIZE
            && Self::read(&mut Cursor::new(data))
                .is_ok_and(|header| header.file_size as usize == data.len())
    }
}
