//! Decoded level geometry: vertices, cubes and their sides

/// Divisor turning a raw 16:16 fixed-point value into a float
const FIXED_16_16: f64 = 65536.0;

/// Divisor turning a raw 4:12 fixed-point texture coordinate into a float
const FIXED_4_12: f64 = 4096.0;

/// Divisor turning raw static light into a float (1.0 is full light)
const LIGHT_SCALE: f64 = 24.0 * 327.68;

/// Convert a 16:16 fixed-point value
pub fn fixed_to_f64(raw: i32) -> f64 {
    f64::from(raw) / FIXED_16_16
}

/// Convert a raw static light value
pub fn light_to_f64(raw: i16) -> f64 {
    f64::from(raw) / LIGHT_SCALE
}

/// A point in level space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Build a vertex from raw 16:16 fixed-point coordinates
    pub fn from_fixed(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: fixed_to_f64(x),
            y: fixed_to_f64(y),
            z: fixed_to_f64(z),
        }
    }
}

/// One of the six sides of a cube
///
/// The discriminant is the side's bit position in the neighbour and wall
/// masks, and its index into the per-side arrays of [`Cube`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// Bit 0
    Left = 0,
    /// Bit 1
    Top = 1,
    /// Bit 2
    Right = 2,
    /// Bit 3
    Bottom = 3,
    /// Bit 4
    Front = 4,
    /// Bit 5
    Back = 5,
}

impl Face {
    /// All sides in mask order
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Front,
        Self::Back,
    ];

    /// Index into per-side arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mask bit for this side
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Positions in [`Cube::vertices`] of the four corners of this side
    ///
    /// Corner order of a cube: front face then back face, each as left-top,
    /// left-bottom, right-bottom, right-top.
    pub fn corner_indices(self) -> [usize; 4] {
        match self {
            Self::Left => [0, 1, 5, 4],
            Self::Top => [0, 3, 7, 4],
            Self::Right => [2, 3, 7, 6],
            Self::Bottom => [1, 2, 6, 5],
            Self::Front => [0, 1, 2, 3],
            Self::Back => [4, 5, 6, 7],
        }
    }

    /// Lower-case side name
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Texture mapping for one corner of a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Uvl {
    /// Raw u coordinate (4:12 fixed point)
    pub u: i16,
    /// Raw v coordinate (4:12 fixed point)
    pub v: i16,
    /// Raw corner light
    pub l: u16,
}

impl Uvl {
    /// Serialized size
    pub const SIZE: usize = 6;

    /// u as a float
    pub fn u(&self) -> f64 {
        f64::from(self.u) / FIXED_4_12
    }

    /// v as a float
    pub fn v(&self) -> f64 {
        f64::from(self.v) / FIXED_4_12
    }
}

/// Texture information for a textured side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideTexture {
    /// Primary texture id, with the "has secondary" flag bit cleared
    pub primary: u16,
    /// Raw secondary (overlay) word, present when the flag bit was set
    pub secondary: Option<u16>,
    /// Mapping for the four corners of the side
    pub uvls: [Uvl; 4],
}

impl SideTexture {
    /// Overlay texture id (low 14 bits of the secondary word)
    pub fn overlay_texture(&self) -> Option<u16> {
        self.secondary.map(|raw| raw & 0x3FFF)
    }

    /// Overlay rotation in quarter turns (top 2 bits of the secondary word)
    pub fn overlay_rotation(&self) -> Option<u8> {
        self.secondary.map(|raw| (raw >> 14) as u8)
    }
}

/// Optional gameplay annotation carried by some cubes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyCenter {
    /// Special cube type
    pub special: u8,
    /// Energy center number
    pub number: i8,
    /// Associated value
    pub value: i16,
}

/// A six-sided cell of the mine
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    /// Indices into the level vertex table, front face then back face
    pub vertices: [u16; 8],
    /// Neighbour per side; `None` marks an exterior side
    ///
    /// Non-negative values are cube indices. Negative values other than the
    /// "none" sentinel are kept as-is; they mark special sides and do not
    /// reference a cube.
    pub neighbors: [Option<i16>; 6],
    /// Wall or door id per side
    pub walls: [Option<u8>; 6],
    /// Static light level
    pub lighting: f64,
    /// Texture per side, present exactly on exterior or walled sides
    pub textures: [Option<SideTexture>; 6],
    /// Energy center record, when flagged in the neighbour mask
    pub energy_center: Option<EnergyCenter>,
}

impl Cube {
    /// Neighbour of `face`, if any
    pub fn neighbor(&self, face: Face) -> Option<i16> {
        self.neighbors[face.index()]
    }

    /// Index of the cube adjoining `face`, when it references one
    pub fn neighbor_cube(&self, face: Face) -> Option<usize> {
        self.neighbor(face)
            .and_then(|raw| usize::try_from(raw).ok())
    }

    /// Wall id on `face`, if any
    pub fn wall(&self, face: Face) -> Option<u8> {
        self.walls[face.index()]
    }

    /// Whether `face` has no neighbouring cube
    pub fn is_exterior(&self, face: Face) -> bool {
        self.neighbor(face).is_none()
    }

    /// Whether `face` carries a texture record
    pub fn has_texture(&self, face: Face) -> bool {
        side_has_texture(self.neighbor(face), self.wall(face))
    }

    /// Texture of `face`, if any
    pub fn texture(&self, face: Face) -> Option<&SideTexture> {
        self.textures[face.index()].as_ref()
    }

    /// Sides without a neighbouring cube
    pub fn exterior_faces(&self) -> impl Iterator<Item = Face> + '_ {
        Face::ALL.into_iter().filter(|&face| self.is_exterior(face))
    }
}

/// A side is textured when it is exterior or holds a wall
///
/// Texture presence is never stored in the file; it is derived from the
/// neighbour and wall of the side.
pub fn side_has_texture(neighbor: Option<i16>, wall: Option<u8>) -> bool {
    neighbor.is_none() || wall.is_some()
}
