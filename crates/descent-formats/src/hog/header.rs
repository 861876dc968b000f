//! Per-entry header preceding each HOG payload

use binrw::BinRead;

/// Entry header: a NUL-padded 13-byte name followed by the payload size
///
/// Binary layout (17 bytes, little-endian):
/// - Name (13 bytes, at most 12 usable characters plus NUL padding)
/// - Payload size (4 bytes)
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct EntryHeader {
    /// Raw NUL-padded name
    pub raw_name: [u8; 13],

    /// Number of payload bytes following this header
    pub size: u32,
}

impl EntryHeader {
    /// Serialized size of the header
    pub const SIZE: usize = 17;

    /// Name up to the first NUL byte
    ///
    /// Names are plain ASCII in shipped containers; anything else is
    /// replaced rather than rejected.
    pub fn name(&self) -> String {
        let end = self
            .raw_name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.raw_name.len());
        String::from_utf8_lossy(&self.raw_name[..end]).into_owned()
    }
}
