//! Exterior surface of a level as quads over the shared vertex table

use crate::ply::PlyOptions;
use crate::rdl::{Cube, Face, Level, Vertex};
use std::io::{self, Write};

/// A four-sided face given as indices into the vertex table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad(pub [u16; 4]);

impl Quad {
    /// The quad covering `face` of `cube`
    pub fn for_face(cube: &Cube, face: Face) -> Self {
        Self(face.corner_indices().map(|corner| cube.vertices[corner]))
    }

    /// Vertex indices in winding order
    pub fn indices(&self) -> [u16; 4] {
        self.0
    }
}

/// Vertex table plus the quads of every exterior side
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<'a> {
    /// Shared vertex table of the level
    pub vertices: &'a [Vertex],
    /// Exterior quads, cube by cube, sides in mask order
    pub quads: Vec<Quad>,
}

impl<'a> Mesh<'a> {
    /// Collect the exterior sides of every cube
    pub fn from_level(level: &'a Level) -> Self {
        let quads = level
            .cubes
            .iter()
            .flat_map(|cube| cube.exterior_faces().map(move |face| Quad::for_face(cube, face)))
            .collect::<Vec<_>>();

        tracing::debug!(
            vertices = level.vertices.len(),
            quads = quads.len(),
            "built mesh"
        );

        Self {
            vertices: &level.vertices,
            quads,
        }
    }

    /// Serialize as ASCII PLY
    pub fn write_ply<W: Write>(
        &self,
        writer: &mut W,
        name: &str,
        options: PlyOptions,
    ) -> io::Result<()> {
        writeln!(writer, "ply")?;
        writeln!(writer, "format ascii 1.0")?;
        writeln!(writer, "comment An exported Descent 1 level ({name})")?;
        writeln!(writer, "element vertex {}", self.vertices.len())?;
        writeln!(writer, "property float x")?;
        writeln!(writer, "property float y")?;
        writeln!(writer, "property float z")?;
        if !options.vertices_only {
            writeln!(writer, "element face {}", self.quads.len())?;
            writeln!(writer, "property list uchar int vertex_index")?;
        }
        writeln!(writer, "end_header")?;

        for vertex in self.vertices {
            writeln!(writer, "{} {} {}", vertex.x, vertex.y, vertex.z)?;
        }

        if !options.vertices_only {
            for Quad([a, b, c, d]) in &self.quads {
                writeln!(writer, "4 {a} {b} {c} {d}")?;
            }
        }

        writer.flush()
    }
}
