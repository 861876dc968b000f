//! `extract`: raw entries

use crate::commands::ensure_dir;
use crate::output::output_path;
use anyhow::{Context, Result};
use descent_formats::hog::HogArchive;
use std::io::Write;
use std::path::Path;

/// Write every entry unchanged into `dir`
pub fn handle<W: Write>(archive: &HogArchive<'_>, dir: &Path, out: &mut W) -> Result<()> {
    ensure_dir(dir)?;

    for entry in archive.entries() {
        let entry = entry?;
        let path = output_path(dir, &entry.name)
            .with_context(|| format!("refusing to extract entry {:?}", entry.name))?;

        writeln!(out, "Writing out {}", entry.name)?;
        std::fs::write(&path, entry.data())
            .with_context(|| format!("cannot write {}", path.display()))?;
    }
    Ok(())
}
