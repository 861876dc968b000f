//! Decoders for Descent 1 game data
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::float_cmp)] // Exact fixed-point conversions in tests
#![allow(clippy::derive_partial_eq_without_eq)] // Geometry structs hold floats
#![allow(clippy::redundant_closure_for_method_calls)] // Iterator chains
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! This crate reads the data files shipped with Descent 1:
//!
//! # Supported Formats
//!
//! - **HOG**: The container bundling every other game file
//! - **RDL**: Level files; the mine geometry (vertices and cubes) is decoded
//! - **TXB**: Scrambled text such as mission briefings
//! - **PLY**: Export of decoded level geometry as an ASCII mesh
//!
//! # Design Principles
//!
//! - **Explicit Decoding**: Every field is read through a bounds-checked
//!   cursor; no structure is reinterpreted from raw memory
//! - **Borrowed Payloads**: Containers held in memory hand out slices, not
//!   copies
//! - **Fail Whole**: A malformed level yields an error naming the offset and
//!   field, never a partially decoded level
//!
//! # Example
//!
//! ```rust,no_run
//! use descent_formats::hog::HogArchive;
//! use descent_formats::ply::{PlyOptions, write_ply};
//! use descent_formats::rdl::Level;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("descent.hog")?;
//! let archive = HogArchive::parse(&data)?;
//!
//! if let Some(entry) = archive.find("level01.rdl")? {
//!     let level = Level::parse(entry.data())?;
//!     write_ply(&mut std::io::stdout(), &level, &entry.name, PlyOptions::default())?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Bounds-checked little-endian reads over a byte slice
pub mod cursor;

/// HOG container format
///
/// Walks the name/size/payload records of a HOG file, either over a buffer
/// held in memory or over a forward-only stream.
pub mod hog;

/// ASCII PLY export of level geometry
pub mod ply;

/// RDL level format: header and mine geometry
pub mod rdl;

/// TXB scrambled text
pub mod txb;

pub use cursor::{ByteCursor, CursorError};
