//! ASCII PLY export of level geometry
//!
//! Every exterior side of every cube becomes one quad over the level's shared
//! vertex table. The output is a plain ASCII PLY file:
//!
//! ```text
//! ply
//! format ascii 1.0
//! comment An exported Descent 1 level (<name>)
//! element vertex N
//! property float x
//! property float y
//! property float z
//! element face M                              (omitted when vertices only)
//! property list uchar int vertex_index        (omitted when vertices only)
//! end_header
//! x y z                                       N lines
//! 4 a b c d                                   M lines (omitted when vertices only)
//! ```

mod mesh;

pub use mesh::{Mesh, Quad};

use crate::rdl::Level;
use std::io::{self, Write};

/// Output switches for [`write_ply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlyOptions {
    /// Write the vertex table only, without the face element
    pub vertices_only: bool,
}

impl PlyOptions {
    /// Options for a vertex-only point cloud
    pub fn vertices_only() -> Self {
        Self {
            vertices_only: true,
        }
    }
}

/// Write a level as ASCII PLY
///
/// `name` is recorded in the header comment.
pub fn write_ply<W: Write>(
    writer: &mut W,
    level: &Level,
    name: &str,
    options: PlyOptions,
) -> io::Result<()> {
    let mesh = Mesh::from_level(level);
    mesh.write_ply(writer, name, options)
}

/// Render a level as an ASCII PLY string
pub fn to_ply_string(level: &Level, name: &str, options: PlyOptions) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    if write_ply(&mut out, level, name, options).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&out).into_owned()
}
