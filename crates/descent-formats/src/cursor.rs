//! Bounds-checked little-endian reader over an in-memory byte buffer
//!
//! Every format in this crate is decoded from a buffer that is already fully
//! resident in memory. [`ByteCursor`] tracks a single forward offset into that
//! buffer and refuses to read past its end, so truncated input surfaces as a
//! [`CursorError::OutOfBounds`] instead of garbage.

use thiserror::Error;

/// Errors raised by [`ByteCursor`] reads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// A read would run past the end of the buffer
    #[error("Out of bounds: reading {needed} bytes at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds {
        /// Offset the read started at
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Total buffer length
        len: usize,
    },
}

/// Result type alias for cursor reads
pub type Result<T> = std::result::Result<T, CursorError>;

/// Forward-seekable reader over an immutable byte slice
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at offset 0
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current absolute offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the current offset and the end of the buffer
    ///
    /// Zero when the cursor has been seeked past the end.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move to an absolute offset
    ///
    /// Seeking past the end is allowed; the next read reports the overrun.
    pub fn seek(&mut self, offset: usize) {
        self.position = offset;
    }

    /// Advance by `count` bytes without reading them
    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Borrow the next `count` bytes and advance past them
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(CursorError::OutOfBounds {
                offset: self.position,
                needed: count,
                len: self.data.len(),
            })?;

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Read a fixed-size array and advance past it
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read an unsigned byte
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a signed byte
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    /// Read an unsigned little-endian 16-bit value
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a signed little-endian 16-bit value
    pub fn read_i16_le(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Read an unsigned little-endian 32-bit value
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a signed little-endian 32-bit value
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }
}
