//! RDL level format support
//!
//! An RDL file is one Descent 1 level. Only the geometry is decoded:
//!
//! ```text
//! offset 0                : header (20 bytes, see LevelHeader)
//! mine_data_offset        : mine data version, counts, vertices, cubes
//! objects_offset          : objects (not decoded)
//! ```
//!
//! A level is a set of cubes: six-sided cells whose eight corners index a
//! shared vertex table. Sides are either shared with a neighbouring cube or
//! exterior. Exterior sides and sides holding a wall carry a texture.
//!
//! # Example
//!
//! ```rust,no_run
//! use descent_formats::rdl::Level;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("level01.rdl")?;
//! let level = Level::parse(&data)?;
//!
//! let exterior: usize = level
//!     .cubes
//!     .iter()
//!     .map(|cube| cube.exterior_faces().count())
//!     .sum();
//! println!("{} cubes, {exterior} exterior sides", level.cubes.len());
//! # Ok(())
//! # }
//! ```

mod cube;
mod error;
mod geometry;
mod header;

pub use cube::{
    Cube, EnergyCenter, Face, SideTexture, Uvl, Vertex, fixed_to_f64, light_to_f64,
    side_has_texture,
};
pub use error::{GeometryFault, RdlError, Result};
pub use geometry::{GeometryDecoder, MineData};
pub use header::LevelHeader;

/// A decoded level: header plus geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Validated header
    pub header: LevelHeader,
    /// Mine data version byte
    pub mine_version: u8,
    /// Shared vertex table
    pub vertices: Vec<Vertex>,
    /// Cubes in stored order
    pub cubes: Vec<Cube>,
}

impl Level {
    /// Validate the header and decode the geometry of a level buffer
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = LevelHeader::parse(data)?;
        let mine = MineData::decode(data, &header)?;

        tracing::debug!(
            version = header.version,
            vertices = mine.vertices.len(),
            cubes = mine.cubes.len(),
            "decoded level"
        );

        Ok(Self {
            header,
            mine_version: mine.version,
            vertices: mine.vertices,
            cubes: mine.cubes,
        })
    }

    /// Vertex referenced by a cube corner index
    pub fn vertex(&self, index: u16) -> Option<&Vertex> {
        self.vertices.get(usize::from(index))
    }

    /// The eight corner positions of a cube
    pub fn cube_corners(&self, cube: &Cube) -> Option<[Vertex; 8]> {
        let mut corners = [Vertex {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }; 8];
        for (corner, &index) in corners.iter_mut().zip(&cube.vertices) {
            *corner = *self.vertex(index)?;
        }
        Some(corners)
    }

    /// Number of textured sides across all cubes
    pub fn textured_side_count(&self) -> usize {
        self.cubes
            .iter()
            .map(|cube| cube.textures.iter().flatten().count())
            .sum()
    }
}
