//! Test utilities for descent-rs
//!
//! Provides byte-level fixture builders for HOG containers and RDL levels, and
//! discovery of a real `descent.hog` for tests that want genuine game data.
//!
//! The fixture builders write the formats directly and share no code with the
//! decoders under test.

#![allow(clippy::cast_possible_truncation)]

use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a real `descent.hog`
pub const DESCENT_HOG_ENV: &str = "DESCENT_HOG";

/// Builder for synthetic HOG containers
#[derive(Debug, Clone, Default)]
pub struct HogFixture {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl HogFixture {
    /// Start an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; names longer than 13 bytes are cut
    pub fn entry(mut self, name: &str, payload: &[u8]) -> Self {
        let mut raw_name = name.as_bytes().to_vec();
        raw_name.truncate(13);
        self.entries.push((raw_name, payload.to_vec()));
        self
    }

    /// Serialize the container
    pub fn build(&self) -> Vec<u8> {
        let mut data = b"DHF".to_vec();
        for (name, payload) in &self.entries {
            let mut raw_name = [0u8; 13];
            raw_name[..name.len()].copy_from_slice(name);
            data.extend_from_slice(&raw_name);
            data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            data.extend_from_slice(payload);
        }
        data
    }

    /// Serialize the container into a temporary file
    pub fn write_temp(&self) -> std::io::Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".hog").tempfile()?;
        file.write_all(&self.build())?;
        file.flush()?;
        Ok(file)
    }
}

/// Texture record written for a textured side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureFixture {
    /// Primary texture id (bit 15 is set automatically when `secondary` is present)
    pub primary: u16,
    /// Optional overlay texture id
    pub secondary: Option<u16>,
    /// Four (u, v, light) records
    pub uvls: [(i16, i16, u16); 4],
}

/// One cube record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CubeFixture {
    /// Neighbour per side; `Some` sets the side's bit in the neighbour mask
    pub neighbors: [Option<i16>; 6],
    /// Corner vertex indices
    pub vertices: [u16; 8],
    /// (special, center number, value); `Some` sets bit 6 of the neighbour mask
    pub energy_center: Option<(u8, i8, i16)>,
    /// Raw static light
    pub raw_lighting: i16,
    /// Wall id per side; `Some` sets the side's bit in the wall mask
    pub walls: [Option<u8>; 6],
    /// Texture written for each side that is exterior or walled
    pub textures: [TextureFixture; 6],
}

impl CubeFixture {
    /// A cube with no neighbours, no walls and default textures
    pub fn exterior(vertices: [u16; 8]) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Whether side `side` carries a texture record
    ///
    /// A stored neighbour of -1 counts as exterior and a stored wall of 255
    /// counts as no wall, matching what the game writes.
    pub fn is_textured(&self, side: usize) -> bool {
        let exterior = matches!(self.neighbors[side], None | Some(-1));
        let walled = matches!(self.walls[side], Some(wall) if wall != 255);
        exterior || walled
    }

    /// Serialize the cube record
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::new();

        let mut neighbor_mask = 0u8;
        for (side, neighbor) in self.neighbors.iter().enumerate() {
            if neighbor.is_some() {
                neighbor_mask |= 1 << side;
            }
        }
        if self.energy_center.is_some() {
            neighbor_mask |= 1 << 6;
        }
        data.push(neighbor_mask);

        for neighbor in self.neighbors.iter().flatten() {
            data.extend_from_slice(&neighbor.to_le_bytes());
        }

        for vertex in &self.vertices {
            data.extend_from_slice(&vertex.to_le_bytes());
        }

        if let Some((special, number, value)) = self.energy_center {
            data.push(special);
            data.extend_from_slice(&number.to_le_bytes());
            data.extend_from_slice(&value.to_le_bytes());
        }

        data.extend_from_slice(&self.raw_lighting.to_le_bytes());

        let mut wall_mask = 0u8;
        for (side, wall) in self.walls.iter().enumerate() {
            if wall.is_some() {
                wall_mask |= 1 << side;
            }
        }
        data.push(wall_mask);
        for wall in self.walls.iter().flatten() {
            data.push(*wall);
        }

        for side in 0..6 {
            if !self.is_textured(side) {
                continue;
            }
            let texture = &self.textures[side];
            match texture.secondary {
                Some(secondary) => {
                    data.extend_from_slice(&(texture.primary | 0x8000).to_le_bytes());
                    data.extend_from_slice(&secondary.to_le_bytes());
                }
                None => data.extend_from_slice(&(texture.primary & 0x7FFF).to_le_bytes()),
            }
            for (u, v, l) in texture.uvls {
                data.extend_from_slice(&u.to_le_bytes());
                data.extend_from_slice(&v.to_le_bytes());
                data.extend_from_slice(&l.to_le_bytes());
            }
        }

        data
    }
}

/// Builder for synthetic RDL levels
///
/// The header is written at offset 0, the mine data directly after it at
/// offset 20, followed by `objects` bytes.
#[derive(Debug, Clone)]
pub struct LevelFixture {
    /// Level signature
    pub signature: [u8; 4],
    /// Level version
    pub version: u32,
    /// Mine data version byte
    pub mine_version: u8,
    /// Raw 16:16 fixed-point vertices
    pub vertices: Vec<[i32; 3]>,
    /// Cube records
    pub cubes: Vec<CubeFixture>,
    /// Opaque bytes of the objects section
    pub objects: Vec<u8>,
    /// Replace the computed file size in the header
    pub file_size_override: Option<u32>,
    /// Replace the computed cube count
    pub cube_count_override: Option<u16>,
}

impl Default for LevelFixture {
    fn default() -> Self {
        Self {
            signature: *b"LVLP",
            version: 1,
            mine_version: 0,
            vertices: Vec::new(),
            cubes: Vec::new(),
            objects: Vec::new(),
            file_size_override: None,
            cube_count_override: None,
        }
    }
}

impl LevelFixture {
    /// Offset of the mine data section
    pub const MINE_DATA_OFFSET: u32 = 20;

    /// Start an empty level
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex given in whole units
    pub fn vertex(mut self, x: f64, y: f64, z: f64) -> Self {
        let fixed = |v: f64| (v * 65536.0).round() as i32;
        self.vertices.push([fixed(x), fixed(y), fixed(z)]);
        self
    }

    /// Append a cube
    pub fn cube(mut self, cube: CubeFixture) -> Self {
        self.cubes.push(cube);
        self
    }

    /// Append the eight corners of an axis-aligned box and return the level
    /// together with their indices, in the cube corner order
    pub fn unit_box(self, origin: (f64, f64, f64)) -> (Self, [u16; 8]) {
        let base = self.vertices.len() as u16;
        let (x, y, z) = origin;
        let level = self
            .vertex(x, y + 1.0, z)
            .vertex(x, y, z)
            .vertex(x + 1.0, y, z)
            .vertex(x + 1.0, y + 1.0, z)
            .vertex(x, y + 1.0, z + 1.0)
            .vertex(x, y, z + 1.0)
            .vertex(x + 1.0, y, z + 1.0)
            .vertex(x + 1.0, y + 1.0, z + 1.0);
        let indices = std::array::from_fn(|i| base + i as u16);
        (level, indices)
    }

    /// Serialize the mine data section alone
    pub fn mine_data(&self) -> Vec<u8> {
        let mut data = vec![self.mine_version];
        data.extend_from_slice(&(self.vertices.len() as u16).to_le_bytes());
        let cube_count = self
            .cube_count_override
            .unwrap_or(self.cubes.len() as u16);
        data.extend_from_slice(&cube_count.to_le_bytes());
        for vertex in &self.vertices {
            for coordinate in vertex {
                data.extend_from_slice(&coordinate.to_le_bytes());
            }
        }
        for cube in &self.cubes {
            data.extend_from_slice(&cube.to_bytes());
        }
        data
    }

    /// Serialize the whole level
    pub fn build(&self) -> Vec<u8> {
        let mine = self.mine_data();
        let objects_offset = Self::MINE_DATA_OFFSET + mine.len() as u32;
        let file_size = objects_offset + self.objects.len() as u32;

        let mut data = Vec::with_capacity(file_size as usize);
        data.extend_from_slice(&self.signature);
        data.extend_from_slice(&self.version.to_le_bytes());
        data.extend_from_slice(&Self::MINE_DATA_OFFSET.to_le_bytes());
        data.extend_from_slice(&objects_offset.to_le_bytes());
        data.extend_from_slice(
            &self
                .file_size_override
                .unwrap_or(file_size)
                .to_le_bytes(),
        );
        data.extend_from_slice(&mine);
        data.extend_from_slice(&self.objects);
        data
    }
}

/// Scramble text the way TXB files store it (inverse of the descrambler)
pub fn scramble_text(plain: &[u8]) -> Vec<u8> {
    plain
        .iter()
        .map(|&b| {
            if b == 0x0A {
                0x0A
            } else {
                (b ^ 0xA7).rotate_right(2)
            }
        })
        .collect()
}

/// Locate a real `descent.hog`
///
/// Checks the `DESCENT_HOG` environment variable first, then a few common
/// install locations.
pub fn find_descent_hog() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(DESCENT_HOG_ENV) {
        let path = PathBuf::from(shellexpand::tilde(&path).to_string());
        if is_hog_file(&path) {
            return Some(path);
        }
    }

    common_hog_paths().into_iter().find(|path| is_hog_file(path))
}

fn common_hog_paths() -> Vec<PathBuf> {
    let bases = if cfg!(windows) {
        vec!["C:\\DESCENT", "C:\\GOG Games\\Descent", "C:\\Games\\Descent"]
    } else {
        vec!["~/descent", "~/.d1x-rebirth", "~/Games/descent", "/usr/share/games/descent"]
    };

    bases
        .into_iter()
        .flat_map(|base| {
            let base = PathBuf::from(shellexpand::tilde(base).to_string());
            [base.join("descent.hog"), base.join("DESCENT.HOG")]
        })
        .collect()
}

/// Whether `path` is a file that starts with the HOG magic
pub fn is_hog_file(path: &Path) -> bool {
    let Ok(mut file) = std::fs::File::open(path) else {
        return false;
    };
    let mut magic = [0u8; 3];
    std::io::Read::read_exact(&mut file, &mut magic).is_ok() && &magic == b"DHF"
}

/// Get a real `descent.hog` path or skip the test with a message
#[macro_export]
macro_rules! require_descent_hog {
    () => {
        match $crate::find_descent_hog() {
            Some(path) => path,
            None => {
                println!(
                    "Skipping test - no descent.hog found (set {})",
                    $crate::DESCENT_HOG_ENV
                );
                return;
            }
        }
    };
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hog_fixture_layout() {
        let data = HogFixture::new().entry("a.txb", b"xy").build();
        assert_eq!(&data[..3], b"DHF");
        assert_eq!(&data[3..8], b"a.txb");
        assert_eq!(data[8..16], [0u8; 8]);
        assert_eq!(&data[16..20], &2u32.to_le_bytes());
        assert_eq!(&data[20..], b"xy");
    }

    #[test]
    fn test_interior_cube_size() {
        let cube = CubeFixture {
            neighbors: [Some(1); 6],
            ..CubeFixture::default()
        };
        assert_eq!(cube.to_bytes().len(), 36);
    }

    #[test]
    fn test_level_header_fields() {
        let level = LevelFixture::new().vertex(1.0, 2.0, 3.0).build();
        assert_eq!(&level[..4], b"LVLP");
        assert_eq!(&level[16..20], &(level.len() as u32).to_le_bytes());
        // version byte, counts, one 12-byte vertex
        assert_eq!(level.len(), 20 + 1 + 4 + 12);
    }

    #[test]
    fn test_scramble_keeps_line_feeds() {
        assert_eq!(scramble_text(b"\n"), b"\n");
        assert_eq!(scramble_text(&[0xA7]), [0x00]);
    }

    #[test]
    fn test_hog_file_detection() {
        assert!(!is_hog_file(Path::new("/nonexistent/descent.hog")));

        let file = HogFixture::new().write_temp().unwrap();
        assert!(is_hog_file(file.path()));
    }
}
