//! HOG container format support
//!
//! A HOG file bundles named sub-files back to back with no table of contents:
//!
//! ```text
//! offset 0 : "DHF" (3 bytes)
//! repeated : name (13 bytes, NUL padded) | size (u32 LE) | payload (size bytes)
//! ```
//!
//! Two readers are provided:
//!
//! - [`HogArchive`] borrows a fully loaded container and lazily yields
//!   [`HogEntry`] values with borrowed payload slices. Iteration can be
//!   restarted at will.
//! - [`HogReader`] streams from any [`std::io::Read`] source, reading each
//!   payload at most once.
//!
//! # Example
//!
//! ```rust,no_run
//! use descent_formats::hog::HogArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("descent.hog")?;
//! let archive = HogArchive::parse(&data)?;
//!
//! for entry in archive.entries() {
//!     let entry = entry?;
//!     println!("{:<13} {}", entry.name, entry.size);
//! }
//! # Ok(())
//! # }
//! ```

mod archive;
mod error;
mod header;
mod reader;

pub use archive::{HOG_MAGIC, HogArchive, HogEntries, HogEntry};
pub use error::{HogError, Result};
pub use header::EntryHeader;
pub use reader::{HogReader, PendingEntry, ReaderState};
