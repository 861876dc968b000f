//! In-memory view over a HOG container

use crate::cursor::ByteCursor;
use crate::hog::error::{HogError, Result};
use crate::hog::header::EntryHeader;
use binrw::BinRead;
use binrw::io::Cursor;
use std::iter::FusedIterator;

/// Container magic
pub const HOG_MAGIC: [u8; 3] = *b"DHF";

/// A HOG container held fully in memory
///
/// The container has no table of contents: entries are discovered by walking
/// header, payload, header, payload... from just after the magic. Every call
/// to [`HogArchive::entries`] starts a fresh walk.
#[derive(Debug, Clone, Copy)]
pub struct HogArchive<'a> {
    data: &'a [u8],
}

/// One named payload within a HOG container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HogEntry<'a> {
    /// Entry name (at most 12 characters)
    pub name: String,
    /// Payload size from the entry header
    pub size: u32,
    /// Absolute offset of the payload within the container
    pub offset: usize,
    data: &'a [u8],
}

impl<'a> HogEntry<'a> {
    /// Borrow the payload bytes
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Whether the entry name ends with `extension` (ASCII case-insensitive)
    ///
    /// `extension` is given without the dot, e.g. `"rdl"`.
    pub fn has_extension(&self, extension: &str) -> bool {
        self.name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(extension))
    }

    /// Entry name without its extension
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem)
    }
}

impl<'a> HogArchive<'a> {
    /// Validate the magic and wrap the container bytes
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < HOG_MAGIC.len() {
            return Err(HogError::TruncatedData {
                expected: HOG_MAGIC.len(),
                actual: data.len(),
            });
        }

        let mut magic = [0u8; 3];
        magic.copy_from_slice(&data[..HOG_MAGIC.len()]);
        if magic != HOG_MAGIC {
            return Err(HogError::InvalidMagic(magic));
        }

        Ok(Self { data })
    }

    /// Whether `data` starts with the container magic
    pub fn is_valid(data: &[u8]) -> bool {
        data.starts_with(&HOG_MAGIC)
    }

    /// Total container size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the container holds nothing beyond the magic
    pub fn is_empty(&self) -> bool {
        self.data.len() <= HOG_MAGIC.len()
    }

    /// Lazily walk the entries in stored order
    pub fn entries(&self) -> HogEntries<'a> {
        let mut cursor = ByteCursor::new(self.data);
        cursor.seek(HOG_MAGIC.len());
        HogEntries {
            cursor,
            done: false,
        }
    }

    /// Find an entry by name (ASCII case-insensitive)
    ///
    /// This rescans the container from the start, so repeated lookups are
    /// O(N) each. Collect [`HogArchive::entries`] once when many lookups are
    /// needed.
    pub fn find(&self, name: &str) -> Result<Option<HogEntry<'a>>> {
        for entry in self.entries() {
            let entry = entry?;
            if entry.name.eq_ignore_ascii_case(name) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

/// Iterator over the entries of a [`HogArchive`]
///
/// Yields an error at most once (for a payload that runs past the end of the
/// container) and then stops.
#[derive(Debug, Clone)]
pub struct HogEntries<'a> {
    cursor: ByteCursor<'a>,
    done: bool,
}

impl<'a> HogEntries<'a> {
    /// Absolute offset of the next header to be read
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn read_entry(&mut self) -> Result<HogEntry<'a>> {
        let header_bytes = self
            .cursor
            .read_bytes(EntryHeader::SIZE)
            .map_err(|e| HogError::BinRead(e.to_string()))?;
        let header = EntryHeader::read(&mut Cursor::new(header_bytes))?;
        let name = header.name();
        let offset = self.cursor.position();

        let data = self
            .cursor
            .read_bytes(header.size as usize)
            .map_err(|_| HogError::TruncatedInput {
                entry: name.clone(),
                offset: offset as u64,
                declared: u64::from(header.size),
                available: self.cursor.remaining() as u64,
            })?;

        tracing::trace!(name = %name, size = header.size, offset, "hog entry");

        Ok(HogEntry {
            name,
            size: header.size,
            offset,
            data,
        })
    }
}

impl<'a> Iterator for HogEntries<'a> {
    type Item = Result<HogEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let remaining = self.cursor.remaining();
        if remaining < EntryHeader::SIZE {
            if remaining > 0 {
                tracing::warn!(
                    offset = self.cursor.position(),
                    trailing = remaining,
                    "ignoring trailing bytes too short for a HOG entry header"
                );
            }
            self.done = true;
            return None;
        }

        let entry = self.read_entry();
        if entry.is_err() {
            self.done = true;
        }
        Some(entry)
    }
}

impl FusedIterator for HogEntries<'_> {}
