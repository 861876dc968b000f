//! Mine data decoder: vertex table and bitmask-driven cube records
//!
//! Mine data layout, starting at the header's mine data offset:
//!
//! ```text
//! version      u8
//! vertex count u16
//! cube count   u16
//! vertices     vertex count × (i32 x, i32 y, i32 z)   16:16 fixed point
//! cubes        cube count × variable-length record
//! ```
//!
//! A cube record is self-describing. Its first byte is a neighbour mask whose
//! bits 0-5 select which sides store a neighbour index (in [`Face`] order) and
//! whose bit 6 flags an energy center record. A second mask later in the record
//! selects which sides store a wall id. Texture records follow for every side
//! that is exterior or walled; nothing in the file marks them explicitly.

use crate::cursor::{ByteCursor, CursorError};
use crate::rdl::cube::{
    Cube, EnergyCenter, Face, SideTexture, Uvl, Vertex, light_to_f64, side_has_texture,
};
use crate::rdl::error::{GeometryFault, RdlError, Result};
use crate::rdl::header::LevelHeader;

/// Neighbour mask bit flagging an energy center record
const ENERGY_CENTER_BIT: u8 = 1 << 6;

/// Raw neighbour value meaning "no neighbour"
const NO_NEIGHBOR: i16 = -1;

/// Raw wall value meaning "no wall"
const NO_WALL: u8 = 255;

/// Primary texture flag announcing a secondary texture word
const SECONDARY_TEXTURE_FLAG: u16 = 0x8000;

/// Size of one vertex record
const VERTEX_SIZE: usize = 12;

/// Version byte plus vertex and cube counts
const MINE_DATA_PREFIX: usize = 1 + 2 + 2;

/// Step-by-step decoder over the mine data of one level
///
/// [`MineData::decode`] drives it end to end; it is public so callers can
/// decode the vertex table alone or inspect cube records one at a time.
#[derive(Debug)]
pub struct GeometryDecoder<'a> {
    cursor: ByteCursor<'a>,
    cube: Option<usize>,
    mine_data_offset: usize,
    version: u8,
    vertex_count: u16,
    cube_count: u16,
}

impl<'a> GeometryDecoder<'a> {
    /// Read the mine data version and counts
    pub fn new(data: &'a [u8], header: &LevelHeader) -> Result<Self> {
        let mine_data_offset = header.mine_data_offset as usize;
        let mut decoder = Self {
            cursor: ByteCursor::new(data),
            cube: None,
            mine_data_offset,
            version: 0,
            vertex_count: 0,
            cube_count: 0,
        };

        decoder.cursor.seek(mine_data_offset);
        decoder.version = decoder.read_u8("mine data version")?;
        decoder.vertex_count = decoder.read_u16("vertex count")?;
        decoder.cube_count = decoder.read_u16("cube count")?;

        tracing::debug!(
            mine_data_offset,
            version = decoder.version,
            vertex_count = decoder.vertex_count,
            cube_count = decoder.cube_count,
            "mine data"
        );

        Ok(decoder)
    }

    /// Mine data version byte
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Number of vertices declared
    pub fn vertex_count(&self) -> u16 {
        self.vertex_count
    }

    /// Number of cubes declared
    pub fn cube_count(&self) -> u16 {
        self.cube_count
    }

    /// Current absolute offset
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Offset of the first vertex record
    pub fn vertex_table_offset(&self) -> usize {
        self.mine_data_offset + MINE_DATA_PREFIX
    }

    /// Offset of the first cube record
    pub fn cube_table_offset(&self) -> usize {
        MineData::cube_table_offset(self.mine_data_offset, self.vertex_count)
    }

    /// Decode the whole vertex table
    pub fn decode_vertices(&mut self) -> Result<Vec<Vertex>> {
        self.cube = None;
        self.cursor.seek(self.vertex_table_offset());

        let mut vertices = Vec::with_capacity(usize::from(self.vertex_count));
        for _ in 0..self.vertex_count {
            let x = self.read_i32("vertex x")?;
            let y = self.read_i32("vertex y")?;
            let z = self.read_i32("vertex z")?;
            vertices.push(Vertex::from_fixed(x, y, z));
        }
        Ok(vertices)
    }

    /// Move to the first cube record
    pub fn seek_to_cubes(&mut self) {
        self.cursor.seek(self.cube_table_offset());
    }

    /// Decode every cube record in stored order
    pub fn decode_cubes(&mut self) -> Result<Vec<Cube>> {
        self.seek_to_cubes();

        let mut cubes = Vec::with_capacity(usize::from(self.cube_count));
        for index in 0..usize::from(self.cube_count) {
            cubes.push(self.decode_cube(index)?);
        }
        self.cube = None;
        Ok(cubes)
    }

    /// Decode the cube record at the current position
    ///
    /// `index` only labels errors and log events.
    pub fn decode_cube(&mut self, index: usize) -> Result<Cube> {
        self.cube = Some(index);
        let start = self.position();

        let neighbor_mask = self.read_u8("neighbor mask")?;

        let mut neighbors = [None; 6];
        for face in Face::ALL {
            if neighbor_mask & face.bit() != 0 {
                neighbors[face.index()] = self.read_neighbor()?;
            }
        }

        let mut vertices = [0u16; 8];
        for vertex in &mut vertices {
            let offset = self.position();
            *vertex = self.read_u16("vertex index")?;
            self.check_index(offset, "vertex index", i64::from(*vertex), self.vertex_count)?;
        }

        let energy_center = if neighbor_mask & ENERGY_CENTER_BIT != 0 {
            Some(EnergyCenter {
                special: self.read_u8("energy center special")?,
                number: self.read_i8("energy center number")?,
                value: self.read_i16("energy center value")?,
            })
        } else {
            None
        };

        let lighting = light_to_f64(self.read_i16("static light")?);

        let wall_mask = self.read_u8("wall mask")?;
        let mut walls = [None; 6];
        for face in Face::ALL {
            if wall_mask & face.bit() != 0 {
                let wall = self.read_u8("wall id")?;
                walls[face.index()] = (wall != NO_WALL).then_some(wall);
            }
        }

        let mut textures = [None; 6];
        for face in Face::ALL {
            let side = face.index();
            if side_has_texture(neighbors[side], walls[side]) {
                textures[side] = Some(self.read_side_texture()?);
            }
        }

        tracing::trace!(
            cube = index,
            offset = start,
            len = self.position() - start,
            neighbor_mask,
            wall_mask,
            "cube"
        );

        Ok(Cube {
            vertices,
            neighbors,
            walls,
            lighting,
            textures,
            energy_center,
        })
    }

    fn read_neighbor(&mut self) -> Result<Option<i16>> {
        let offset = self.position();
        let raw = self.read_i16("neighbor index")?;
        if raw == NO_NEIGHBOR {
            return Ok(None);
        }
        if raw >= 0 {
            self.check_index(offset, "neighbor index", i64::from(raw), self.cube_count)?;
        }
        Ok(Some(raw))
    }

    fn read_side_texture(&mut self) -> Result<SideTexture> {
        let raw_primary = self.read_u16("primary texture")?;
        let secondary = if raw_primary & SECONDARY_TEXTURE_FLAG != 0 {
            Some(self.read_u16("secondary texture")?)
        } else {
            None
        };

        let mut uvls = [Uvl::default(); 4];
        for uvl in &mut uvls {
            *uvl = Uvl {
                u: self.read_i16("uvl u")?,
                v: self.read_i16("uvl v")?,
                l: self.read_u16("uvl light")?,
            };
        }

        Ok(SideTexture {
            primary: raw_primary & !SECONDARY_TEXTURE_FLAG,
            secondary,
            uvls,
        })
    }

    fn check_index(&self, offset: usize, field: &'static str, index: i64, bound: u16) -> Result<()> {
        if index < 0 || index >= i64::from(bound) {
            return Err(self.malformed(
                offset,
                field,
                GeometryFault::IndexOutOfRange {
                    index,
                    bound: usize::from(bound),
                },
            ));
        }
        Ok(())
    }

    fn malformed(&self, offset: usize, field: &'static str, fault: GeometryFault) -> RdlError {
        RdlError::MalformedGeometry {
            offset,
            field,
            cube: self.cube,
            fault,
        }
    }

    fn read_with<T>(
        &mut self,
        field: &'static str,
        read: impl FnOnce(&mut ByteCursor<'a>) -> std::result::Result<T, CursorError>,
    ) -> Result<T> {
        let offset = self.position();
        read(&mut self.cursor).map_err(|e| self.malformed(offset, field, e.into()))
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.read_with(field, ByteCursor::read_u8)
    }

    fn read_i8(&mut self, field: &'static str) -> Result<i8> {
        self.read_with(field, ByteCursor::read_i8)
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.read_with(field, ByteCursor::read_u16_le)
    }

    fn read_i16(&mut self, field: &'static str) -> Result<i16> {
        self.read_with(field, ByteCursor::read_i16_le)
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        self.read_with(field, ByteCursor::read_i32_le)
    }
}

/// Decoded mine data of one level
#[derive(Debug, Clone, PartialEq)]
pub struct MineData {
    /// Mine data version byte
    pub version: u8,
    /// Vertex table
    pub vertices: Vec<Vertex>,
    /// Cube table
    pub cubes: Vec<Cube>,
}

impl MineData {
    /// Offset of the first cube record: the cube table follows the vertex
    /// table directly
    pub fn cube_table_offset(mine_data_offset: usize, vertex_count: u16) -> usize {
        mine_data_offset + MINE_DATA_PREFIX + VERTEX_SIZE * usize::from(vertex_count)
    }

    /// Decode the vertex and cube tables
    ///
    /// Decoding stops at the first malformed field; nothing partial is
    /// returned.
    pub fn decode(data: &[u8], header: &LevelHeader) -> Result<Self> {
        let mut decoder = GeometryDecoder::new(data, header)?;
        let vertices = decoder.decode_vertices()?;
        let cubes = decoder.decode_cubes()?;

        Ok(Self {
            version: decoder.version(),
            vertices,
            cubes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use descent_test_utils::{CubeFixture, LevelFixture, TextureFixture};
    use pretty_assertions::assert_eq;

    fn decode(fixture: &LevelFixture) -> Result<MineData> {
        let data = fixture.build();
        let header = LevelHeader::parse(&data)?;
        MineData::decode(&data, &header)
    }

    fn unit_level() -> (LevelFixture, [u16; 8]) {
        LevelFixture::new().unit_box((0.0, 0.0, 0.0))
    }

    #[test]
    fn test_empty_mine() {
        let mine = decode(&LevelFixture::new()).unwrap();
        assert!(mine.vertices.is_empty());
        assert!(mine.cubes.is_empty());
    }

    #[test]
    fn test_vertex_table() {
        let fixture = LevelFixture::new()
            .vertex(1.0, -1.0, 0.5)
            .vertex(-20.25, 0.0, 3.0);
        let mine = decode(&fixture).unwrap();

        assert_eq!(
            mine.vertices,
            vec![
                Vertex {
                    x: 1.0,
                    y: -1.0,
                    z: 0.5
                },
                Vertex {
                    x: -20.25,
                    y: 0.0,
                    z: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_cube_table_offset() {
        let (fixture, _) = unit_level();
        let data = fixture.build();
        let header = LevelHeader::parse(&data).unwrap();
        let decoder = GeometryDecoder::new(&data, &header).unwrap();

        assert_eq!(decoder.vertex_count(), 8);
        assert_eq!(decoder.cube_count(), 0);
        assert_eq!(decoder.vertex_table_offset(), 20 + 5);
        assert_eq!(decoder.cube_table_offset(), 20 + 5 + 8 * 12);
        assert_eq!(MineData::cube_table_offset(20, 8), decoder.cube_table_offset());
        assert_eq!(MineData::cube_table_offset(100, 0), 105);
    }

    #[test]
    fn test_exterior_cube() {
        let (fixture, corners) = unit_level();
        let mut cube = CubeFixture::exterior(corners);
        cube.raw_lighting = 7864;
        for (side, texture) in cube.textures.iter_mut().enumerate() {
            texture.primary = 10 + side as u16;
        }
        let mine = decode(&fixture.cube(cube)).unwrap();

        assert_eq!(mine.cubes.len(), 1);
        let cube = &mine.cubes[0];
        assert_eq!(cube.vertices, corners);
        assert_eq!(cube.neighbors, [None; 6]);
        assert_eq!(cube.walls, [None; 6]);
        assert!(cube.energy_center.is_none());
        assert!((cube.lighting - 1.0).abs() < 1e-3);
        for face in Face::ALL {
            let texture = cube.texture(face).unwrap();
            assert_eq!(texture.primary, 10 + face.index() as u16);
            assert_eq!(texture.secondary, None);
        }
    }

    #[test]
    fn test_interior_cube_consumes_36_bytes_and_has_no_textures() {
        let (fixture, corners) = unit_level();
        let fixture = fixture.cube(CubeFixture {
            neighbors: [Some(0); 6],
            vertices: corners,
            ..CubeFixture::default()
        });
        let data = fixture.build();
        let header = LevelHeader::parse(&data).unwrap();
        let mut decoder = GeometryDecoder::new(&data, &header).unwrap();

        decoder.seek_to_cubes();
        let start = decoder.position();
        let cube = decoder.decode_cube(0).unwrap();

        assert_eq!(decoder.position() - start, 36);
        assert_eq!(cube.neighbors, [Some(0); 6]);
        assert_eq!(cube.textures, [None; 6]);
    }

    #[test]
    fn test_walled_interior_side_is_textured() {
        let (fixture, corners) = unit_level();
        let mut neighbors = [Some(1); 6];
        neighbors[Face::Front.index()] = None;
        let mut walls = [None; 6];
        walls[Face::Right.index()] = Some(7);
        let cube = CubeFixture {
            neighbors,
            vertices: corners,
            walls,
            ..CubeFixture::default()
        };
        let fixture = fixture.cube(cube.clone()).cube(cube);

        let mine = decode(&fixture).unwrap();
        let cube = &mine.cubes[0];
        let textured: Vec<Face> = Face::ALL
            .into_iter()
            .filter(|&f| cube.texture(f).is_some())
            .collect();
        assert_eq!(textured, vec![Face::Right, Face::Front]);
        assert_eq!(cube.wall(Face::Right), Some(7));
        assert_eq!(cube.neighbor_cube(Face::Right), Some(1));
        assert_eq!(mine.cubes[1], mine.cubes[0]);
    }

    #[test]
    fn test_secondary_texture_flag() {
        let (fixture, corners) = unit_level();
        let mut cube = CubeFixture {
            neighbors: [Some(0); 6],
            vertices: corners,
            ..CubeFixture::default()
        };
        cube.neighbors[Face::Top.index()] = None;
        cube.textures[Face::Top.index()] = TextureFixture {
            primary: 0x0123,
            secondary: Some(0x4000 | 0x0042),
            uvls: [(4096, 0, 1), (0, 4096, 2), (-4096, 0, 3), (0, -4096, 4)],
        };

        let mine = decode(&fixture.cube(cube)).unwrap();
        let texture = mine.cubes[0].texture(Face::Top).unwrap();
        assert_eq!(texture.primary, 0x0123);
        assert_eq!(texture.secondary, Some(0x4042));
        assert_eq!(texture.overlay_texture(), Some(0x42));
        assert_eq!(texture.overlay_rotation(), Some(1));
        assert_eq!(
            texture.uvls[0],
            Uvl {
                u: 4096,
                v: 0,
                l: 1
            }
        );
        assert_eq!(texture.uvls[3].v(), -1.0);
    }

    #[test]
    fn test_energy_center_record() {
        let (fixture, corners) = unit_level();
        let mut cube = CubeFixture::exterior(corners);
        cube.energy_center = Some((2, -1, 300));
        cube.raw_lighting = -5;

        let mine = decode(&fixture.cube(cube)).unwrap();
        let cube = &mine.cubes[0];
        assert_eq!(
            cube.energy_center,
            Some(EnergyCenter {
                special: 2,
                number: -1,
                value: 300
            })
        );
        assert!(cube.lighting < 0.0);
        assert!(cube.textures.iter().all(Option::is_some));
    }

    #[test]
    fn test_sentinel_values_in_stream() {
        let (fixture, corners) = unit_level();
        let mut cube = CubeFixture {
            neighbors: [Some(0); 6],
            vertices: corners,
            ..CubeFixture::default()
        };
        // Stored but equal to the "none" sentinels
        cube.neighbors[Face::Left.index()] = Some(-1);
        cube.walls[Face::Back.index()] = Some(255);

        let mine = decode(&fixture.cube(cube)).unwrap();
        let cube = &mine.cubes[0];
        assert_eq!(cube.neighbor(Face::Left), None);
        assert_eq!(cube.wall(Face::Back), None);
        assert!(cube.texture(Face::Left).is_some());
        assert!(cube.texture(Face::Back).is_none());
    }

    #[test]
    fn test_special_negative_neighbor_is_kept() {
        let (fixture, corners) = unit_level();
        let mut cube = CubeFixture {
            neighbors: [Some(0); 6],
            vertices: corners,
            ..CubeFixture::default()
        };
        cube.neighbors[Face::Bottom.index()] = Some(-2);

        let mine = decode(&fixture.cube(cube)).unwrap();
        let cube = &mine.cubes[0];
        assert_eq!(cube.neighbor(Face::Bottom), Some(-2));
        assert_eq!(cube.neighbor_cube(Face::Bottom), None);
        assert!(cube.texture(Face::Bottom).is_none());
    }

    #[test]
    fn test_vertex_index_out_of_range() {
        let (fixture, mut corners) = unit_level();
        corners[5] = 8;
        let fixture = fixture.cube(CubeFixture::exterior(corners));

        match decode(&fixture) {
            Err(RdlError::MalformedGeometry {
                offset,
                field,
                cube,
                fault,
            }) => {
                // mask byte, then five vertex indices precede the bad one
                assert_eq!(offset, 20 + 5 + 8 * 12 + 1 + 5 * 2);
                assert_eq!(field, "vertex index");
                assert_eq!(cube, Some(0));
                assert_eq!(fault, GeometryFault::IndexOutOfRange { index: 8, bound: 8 });
            }
            other => panic!("expected malformed geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_neighbor_index_out_of_range() {
        let (fixture, corners) = unit_level();
        let mut cube = CubeFixture::exterior(corners);
        cube.neighbors[Face::Top.index()] = Some(1);

        match decode(&fixture.cube(cube)) {
            Err(RdlError::MalformedGeometry { field, fault, .. }) => {
                assert_eq!(field, "neighbor index");
                assert_eq!(fault, GeometryFault::IndexOutOfRange { index: 1, bound: 1 });
            }
            other => panic!("expected malformed geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_cube_table() {
        let (fixture, corners) = unit_level();
        let fixture = LevelFixture {
            cube_count_override: Some(2),
            ..fixture.cube(CubeFixture::exterior(corners))
        };

        match decode(&fixture) {
            Err(RdlError::MalformedGeometry {
                field, cube, fault, ..
            }) => {
                assert_eq!(field, "neighbor mask");
                assert_eq!(cube, Some(1));
                assert!(matches!(fault, GeometryFault::OutOfBounds(_)));
            }
            other => panic!("expected malformed geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_vertex_table() {
        let mut data = LevelFixture::new().vertex(1.0, 1.0, 1.0).build();
        // Claim two vertices while only one is stored
        data[21..23].copy_from_slice(&2u16.to_le_bytes());
        let header = LevelHeader::parse(&data).unwrap();

        match MineData::decode(&data, &header) {
            Err(RdlError::MalformedGeometry {
                offset, field, cube, ..
            }) => {
                assert_eq!(offset, 20 + 5 + 12);
                assert_eq!(field, "vertex x");
                assert_eq!(cube, None);
            }
            other => panic!("expected malformed geometry, got {other:?}"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Texture presence is exactly "exterior or walled" for every side,
            /// and the decoder consumes every byte of every record
            #[test]
            fn texture_presence_follows_neighbor_and_wall(
                sides in prop::collection::vec((any::<bool>(), any::<bool>(), 0u8..255, any::<bool>()), 6),
                energy_center in any::<bool>(),
            ) {
                let (fixture, corners) = unit_level();
                let mut cube = CubeFixture::exterior(corners);
                for (side, &(has_neighbor, has_wall, wall, has_secondary)) in sides.iter().enumerate() {
                    cube.neighbors[side] = has_neighbor.then_some(0);
                    cube.walls[side] = has_wall.then_some(wall);
                    cube.textures[side].primary = side as u16;
                    cube.textures[side].secondary = has_secondary.then_some(0x1000);
                }
                if energy_center {
                    cube.energy_center = Some((1, 0, 0));
                }

                let data = fixture.cube(cube.clone()).build();
                let header = LevelHeader::parse(&data)?;
                let mut decoder = GeometryDecoder::new(&data, &header)?;
                decoder.seek_to_cubes();
                let decoded = decoder.decode_cube(0)?;

                prop_assert_eq!(decoder.position(), data.len());
                for face in Face::ALL {
                    let (has_neighbor, has_wall, _, has_secondary) = sides[face.index()];
                    let expected = !has_neighbor || has_wall;
                    prop_assert_eq!(decoded.has_texture(face), expected);
                    prop_assert_eq!(decoded.texture(face).is_some(), expected);
                    prop_assert_eq!(decoded.neighbor(face).is_some(), has_neighbor);
                    if let Some(texture) = decoded.texture(face) {
                        prop_assert_eq!(texture.primary, face.index() as u16);
                        prop_assert_eq!(texture.secondary.is_some(), has_secondary);
                    }
                }
                prop_assert_eq!(decoded.energy_center.is_some(), energy_center);
            }
        }
    }
}
