//! `export` and `export-all`: level geometry as PLY

use crate::commands::ensure_dir;
use crate::output::{file_name_with_extension, output_path};
use anyhow::{Context, Result, anyhow, bail};
use descent_formats::hog::{HogArchive, HogEntry};
use descent_formats::ply::{PlyOptions, write_ply};
use descent_formats::rdl::Level;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn ply_options(vertices_only: bool) -> PlyOptions {
    PlyOptions { vertices_only }
}

fn decode(entry: &HogEntry<'_>) -> Result<Level> {
    Level::parse(entry.data()).with_context(|| format!("cannot decode {}", entry.name))
}

fn write_file(path: &Path, level: &Level, name: &str, options: PlyOptions) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ply(&mut writer, level, name, options)
        .with_context(|| format!("cannot write {}", path.display()))
}

/// Export one level to `output`, or to `out` when no file is given
pub fn handle<W: Write>(
    archive: &HogArchive<'_>,
    entry_name: &str,
    vertices_only: bool,
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let entry = archive
        .find(entry_name)?
        .ok_or_else(|| anyhow!("no entry named {entry_name}"))?;
    let level = decode(&entry)?;

    tracing::info!(
        entry = %entry.name,
        vertices = level.vertices.len(),
        cubes = level.cubes.len(),
        "exporting level"
    );

    match output {
        Some(path) => write_file(path, &level, &entry.name, ply_options(vertices_only)),
        None => {
            write_ply(out, &level, &entry.name, ply_options(vertices_only))?;
            Ok(())
        }
    }
}

/// Write one level into `dir`, returning the file name used
fn export_entry(entry: &HogEntry<'_>, dir: &Path, options: PlyOptions) -> Result<String> {
    let file_name = file_name_with_extension(entry.stem(), "ply")?;
    let level = decode(entry)?;
    let path = output_path(dir, &file_name)?;
    write_file(&path, &level, &entry.name, options)?;
    Ok(file_name)
}

/// Export every `.rdl` entry as `<stem>.ply` inside `dir`
///
/// Levels that fail are reported and skipped; the command fails only when
/// every level failed.
pub fn handle_all<W: Write>(
    archive: &HogArchive<'_>,
    dir: &Path,
    vertices_only: bool,
    out: &mut W,
) -> Result<()> {
    ensure_dir(dir)?;

    let mut written = 0usize;
    let mut failed = 0usize;
    for entry in archive.entries() {
        let entry = entry?;
        if !entry.has_extension("rdl") {
            continue;
        }

        match export_entry(&entry, dir, ply_options(vertices_only)) {
            Ok(file_name) => {
                writeln!(out, "Writing out {file_name}")?;
                written += 1;
            }
            Err(e) => {
                tracing::warn!(entry = %entry.name, "skipping level: {e:#}");
                failed += 1;
            }
        }
    }

    if written == 0 && failed > 0 {
        bail!("none of the {failed} levels could be exported");
    }
    if written == 0 {
        tracing::warn!("no levels found");
    }
    Ok(())
}
