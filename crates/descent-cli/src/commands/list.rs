//! `list`: entry names and sizes

use anyhow::Result;
use descent_formats::hog::HogArchive;
use std::io::Write;

/// Print a name/size table followed by the entry count
pub fn handle<W: Write>(archive: &HogArchive<'_>, out: &mut W) -> Result<()> {
    writeln!(out, "{:<13} Size", "Name")?;
    writeln!(out, "=====================")?;

    let mut count = 0usize;
    for entry in archive.entries() {
        let entry = entry?;
        writeln!(out, "{:<13} {}", entry.name, entry.size)?;
        count += 1;
    }

    writeln!(out, "{count} entries")?;
    Ok(())
}
