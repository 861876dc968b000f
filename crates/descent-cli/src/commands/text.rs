//! `text`: descramble TXB entries

use crate::commands::ensure_dir;
use crate::output::{file_name_with_extension, output_path};
use anyhow::{Context, Result};
use descent_formats::hog::HogArchive;
use descent_formats::txb::TxbText;
use std::io::Write;
use std::path::Path;

/// Write every `.txb` entry as `<stem>.txt` inside `dir`
pub fn handle<W: Write>(archive: &HogArchive<'_>, dir: &Path, out: &mut W) -> Result<()> {
    ensure_dir(dir)?;

    for entry in archive.entries() {
        let entry = entry?;
        if !entry.has_extension("txb") {
            continue;
        }

        let file_name = file_name_with_extension(entry.stem(), "txt")?;
        let path = output_path(dir, &file_name)?;
        writeln!(out, "Writing out {file_name}")?;

        let text = TxbText::new(entry.data());
        std::fs::write(&path, text.to_vec())
            .with_context(|| format!("cannot write {}", path.display()))?;
    }
    Ok(())
}
