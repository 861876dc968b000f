//! TXB scrambled text support
//!
//! Briefings and other text in a HOG are stored scrambled one byte at a
//! time. Line feeds are stored as-is; every other byte is rotated left by two
//! bits and XORed with a fixed key. Descrambling needs no state, so
//! [`TxbText`] hands out fresh iterators over the borrowed bytes on demand.

use std::iter::FusedIterator;

/// Key XORed into every scrambled byte
pub const TXB_KEY: u8 = 0xA7;

/// Byte stored unchanged
const LINE_FEED: u8 = 0x0A;

/// Descramble a single TXB byte
pub fn descramble_byte(byte: u8) -> u8 {
    if byte == LINE_FEED {
        LINE_FEED
    } else {
        byte.rotate_left(2) ^ TXB_KEY
    }
}

/// A borrowed TXB payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxbText<'a> {
    data: &'a [u8],
}

impl<'a> TxbText<'a> {
    /// Wrap scrambled bytes
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Scrambled length in bytes (equal to the descrambled length)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Descrambled bytes, computed lazily
    pub fn bytes(&self) -> TxbBytes<'a> {
        TxbBytes {
            inner: self.data.iter(),
        }
    }

    /// Descrambled characters, one per byte (each byte taken as the code
    /// point of the same value)
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        self.bytes().map(char::from)
    }

    /// Descramble everything into a `Vec`
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes().collect()
    }

    /// Descramble into a `String`, decoding the bytes as UTF-8 lossily
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_vec()).into_owned()
    }
}

/// Iterator over descrambled bytes of a [`TxbText`]
#[derive(Debug, Clone)]
pub struct TxbBytes<'a> {
    inner: std::slice::Iter<'a, u8>,
}

impl Iterator for TxbBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.inner.next().map(|&b| descramble_byte(b))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for TxbBytes<'_> {
    fn next_back(&mut self) -> Option<u8> {
        self.inner.next_back().map(|&b| descramble_byte(b))
    }
}

impl ExactSizeIterator for TxbBytes<'_> {}

impl FusedIterator for TxbBytes<'_> {}
