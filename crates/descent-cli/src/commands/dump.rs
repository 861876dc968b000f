//! `dump`: debug view of decoded levels

use crate::output::create_side_table;
use anyhow::{Result, anyhow};
use descent_formats::hog::{HogArchive, HogEntry};
use descent_formats::rdl::{Cube, Face, Level};
use std::io::Write;

/// Print every level, or only `entry_name` when given
///
/// A level that fails to decode is reported in place and the dump goes on.
pub fn handle<W: Write>(
    archive: &HogArchive<'_>,
    entry_name: Option<&str>,
    out: &mut W,
) -> Result<()> {
    if let Some(name) = entry_name {
        let entry = archive
            .find(name)?
            .ok_or_else(|| anyhow!("no entry named {name}"))?;
        return dump_entry(&entry, out);
    }

    for entry in archive.entries() {
        let entry = entry?;
        if entry.has_extension("rdl") {
            dump_entry(&entry, out)?;
        }
    }
    Ok(())
}

fn dump_entry<W: Write>(entry: &HogEntry<'_>, out: &mut W) -> Result<()> {
    writeln!(out, "File: {} Size: {}", entry.name, entry.size)?;

    let level = match Level::parse(entry.data()) {
        Ok(level) => level,
        Err(e) => {
            writeln!(out, "  Error: {e}")?;
            return Ok(());
        }
    };
    dump_level(&level, out)
}

fn dump_level<W: Write>(level: &Level, out: &mut W) -> Result<()> {
    let header = &level.header;
    writeln!(
        out,
        "Version: {} Mine data: {} Objects: {} File size: {}",
        header.version, header.mine_data_offset, header.objects_offset, header.file_size
    )?;

    writeln!(out, "Vertex count: {}", level.vertices.len())?;
    for vertex in &level.vertices {
        writeln!(out, "{:16.6} {:16.6} {:16.6}", vertex.x, vertex.y, vertex.z)?;
    }

    writeln!(out, "Cube count: {}", level.cubes.len())?;
    for (index, cube) in level.cubes.iter().enumerate() {
        dump_cube(index, cube, out)?;
    }
    Ok(())
}

fn dump_cube<W: Write>(index: usize, cube: &Cube, out: &mut W) -> Result<()> {
    writeln!(out, "Cube {index}: light {:.3}", cube.lighting)?;
    writeln!(out, "  vertices {:?}", cube.vertices)?;
    if let Some(center) = &cube.energy_center {
        writeln!(
            out,
            "  energy center special {} number {} value {}",
            center.special, center.number, center.value
        )?;
    }

    let mut table = create_side_table();
    for face in Face::ALL {
        let neighbor = cube
            .neighbor(face)
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let wall = cube
            .wall(face)
            .map_or_else(|| "-".to_string(), |w| w.to_string());
        let texture = match cube.texture(face) {
            Some(texture) => match texture.secondary {
                Some(_) => format!(
                    "{}+{}",
                    texture.primary,
                    texture.overlay_texture().unwrap_or_default()
                ),
                None => texture.primary.to_string(),
            },
            None => "-".to_string(),
        };
        table.add_row(vec![face.name().to_string(), neighbor, wall, texture]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
