//! Output helpers: file naming and terminal tables.
//!
//! HOG entry names come from the file being read, so they are checked before
//! they touch the file system: a name must be a single plain path component.

use crate::error::OutputNameError;
use comfy_table::{CellAlignment, ContentArrangement, Table, presets};
use std::path::{Path, PathBuf};

/// Borderless table with one row per cube side, used by `dump`
///
/// Columns are side name, neighbour, wall and texture; the numeric
/// neighbour and wall columns are right-aligned.
pub fn create_side_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec!["Side", "Neighbor", "Wall", "Texture"]);

    for index in [1, 2] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

/// Check that an entry name is usable as a file name inside a directory
pub fn sanitize_entry_name(name: &str) -> Result<&str, OutputNameError> {
    if name.is_empty() {
        return Err(OutputNameError::Empty);
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c == ':' || c.is_control())
    {
        return Err(OutputNameError::InvalidCharacter(name.to_string()));
    }
    if name == "." || name == ".." {
        return Err(OutputNameError::Reserved(name.to_string()));
    }
    Ok(name)
}

/// `<stem>.<extension>` after checking the stem
pub fn file_name_with_extension(stem: &str, extension: &str) -> Result<String, OutputNameError> {
    let stem = sanitize_entry_name(stem)?;
    Ok(format!("{stem}.{extension}"))
}

/// Join a checked file name onto the output directory
pub fn output_path(dir: &Path, file_name: &str) -> Result<PathBuf, OutputNameError> {
    Ok(dir.join(sanitize_entry_name(file_name)?))
}
