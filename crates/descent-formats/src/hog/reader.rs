//! Forward-only HOG reader over a non-seekable stream
//!
//! [`HogReader`] walks a container read from any [`Read`] source without
//! buffering it. Each step hands out a [`PendingEntry`]; its payload can be
//! fetched once through [`PendingEntry::read_payload`], which consumes the
//! entry. Payloads that are never fetched are skipped on the next step.

use crate::hog::archive::HOG_MAGIC;
use crate::hog::error::{HogError, Result};
use crate::hog::header::EntryHeader;
use binrw::BinRead;
use binrw::io::Cursor;
use std::io::{self, Read};

/// Position of a [`HogReader`] in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Magic not yet read
    Unopened,
    /// Magic validated; `pending` payload bytes of the current entry have not
    /// been consumed yet
    Positioned {
        /// Unread payload bytes of the current entry
        pending: u64,
    },
    /// End of container reached or an error stopped iteration
    Exhausted,
}

/// Streaming HOG reader
#[derive(Debug)]
pub struct HogReader<R> {
    inner: R,
    state: ReaderState,
    offset: u64,
    current: String,
}

/// An entry whose header has been read but whose payload has not
#[derive(Debug)]
pub struct PendingEntry<'r, R> {
    reader: &'r mut HogReader<R>,
    name: String,
    size: u32,
    offset: u64,
}

impl<R: Read> HogReader<R> {
    /// Wrap a stream without reading from it
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            state: ReaderState::Unopened,
            offset: 0,
            current: String::new(),
        }
    }

    /// Wrap a stream and validate the container magic
    pub fn open(inner: R) -> Result<Self> {
        let mut reader = Self::new(inner);
        reader.read_magic()?;
        Ok(reader)
    }

    /// Current state
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Bytes consumed from the stream so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Release the underlying stream
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_magic(&mut self) -> Result<()> {
        let mut magic = [0u8; 3];
        let read = self.fill(&mut magic)?;
        if read < magic.len() {
            self.state = ReaderState::Exhausted;
            return Err(HogError::TruncatedData {
                expected: magic.len(),
                actual: read,
            });
        }
        if magic != HOG_MAGIC {
            self.state = ReaderState::Exhausted;
            return Err(HogError::InvalidMagic(magic));
        }
        self.state = ReaderState::Positioned { pending: 0 };
        Ok(())
    }

    /// Read as many bytes as the stream offers, up to `buf.len()`
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.offset += filled as u64;
                    self.state = ReaderState::Exhausted;
                    return Err(e.into());
                }
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }

    fn skip_pending(&mut self, pending: u64) -> Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(pending), &mut io::sink())?;
        self.offset += skipped;
        if skipped < pending {
            self.state = ReaderState::Exhausted;
            return Err(HogError::TruncatedInput {
                entry: std::mem::take(&mut self.current),
                offset: self.offset - skipped,
                declared: pending,
                available: skipped,
            });
        }
        Ok(())
    }

    /// Advance to the next entry
    ///
    /// Returns `Ok(None)` once the stream ends at an entry boundary. A
    /// trailing fragment shorter than an entry header also ends iteration.
    pub fn next_entry(&mut self) -> Result<Option<PendingEntry<'_, R>>> {
        match self.state {
            ReaderState::Unopened => self.read_magic()?,
            ReaderState::Exhausted => return Ok(None),
            ReaderState::Positioned { pending } if pending > 0 => self.skip_pending(pending)?,
            ReaderState::Positioned { .. } => {}
        }

        let mut header_bytes = [0u8; EntryHeader::SIZE];
        let read = self.fill(&mut header_bytes)?;
        if read < EntryHeader::SIZE {
            if read > 0 {
                tracing::warn!(
                    offset = self.offset,
                    trailing = read,
                    "ignoring trailing bytes too short for a HOG entry header"
                );
            }
            self.state = ReaderState::Exhausted;
            return Ok(None);
        }

        let header = EntryHeader::read(&mut Cursor::new(&header_bytes[..]))?;
        self.state = ReaderState::Positioned {
            pending: u64::from(header.size),
        };

        let name = header.name();
        tracing::trace!(name = %name, size = header.size, offset = self.offset, "hog entry");
        self.current.clone_from(&name);

        Ok(Some(PendingEntry {
            name,
            size: header.size,
            offset: self.offset,
            reader: self,
        }))
    }
}

impl<R: Read> PendingEntry<'_, R> {
    /// Entry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload size from the entry header
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Stream offset of the payload
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the payload, consuming the entry
    ///
    /// The buffer grows with the bytes actually received, so a declared size
    /// larger than the stream is reported as truncation rather than allocated.
    pub fn read_payload(self) -> Result<Vec<u8>> {
        let declared = u64::from(self.size);
        let mut payload = Vec::new();
        let result = (&mut self.reader.inner)
            .take(declared)
            .read_to_end(&mut payload);
        let read = payload.len() as u64;
        self.reader.offset += read;

        if let Err(e) = result {
            self.reader.state = ReaderState::Exhausted;
            return Err(e.into());
        }
        if read < declared {
            self.reader.state = ReaderState::Exhausted;
            return Err(HogError::TruncatedInput {
                entry: self.name,
                offset: self.offset,
                declared,
                available: read,
            });
        }
        self.reader.state = ReaderState::Positioned { pending: 0 };
        Ok(payload)
    }
}
