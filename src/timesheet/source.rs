//! Uploaded timesheet file reading.
//!
//! Uploaded files are resolved by name against the configured upload
//! directory and decoded into a plain cell grid. Excel workbooks (`.xlsx`,
//! `.xls`) go through `calamine`; `.csv` files go through the `csv` crate
//! with flexible row lengths. Every failure here is per-file: the assembler
//! records it against the file and moves on.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{EngineError, EngineResult};

/// A decoded sheet: rows of cell texts, top to bottom.
///
/// An empty string marks a truly empty cell; numeric cells carry their
/// display text.
pub type SheetGrid = Vec<Vec<String>>;

fn read_error(path: &Path, message: impl Into<String>) -> EngineError {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    EngineError::TimesheetReadError {
        filename,
        message: message.into(),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value.as_f64().to_string(),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
    }
}

fn read_workbook(path: &Path) -> EngineResult<SheetGrid> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| read_error(path, e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error(path, "workbook has no sheets"))?
        .map_err(|e| read_error(path, e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn read_csv(path: &Path) -> EngineResult<SheetGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(path, e.to_string()))?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e.to_string()))?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Resolves an uploaded file name against the upload directory.
///
/// The name must be a bare file name. Anything carrying path separators or
/// directory traversal is rejected with a per-file
/// [`EngineError::TimesheetReadError`] before it ever touches the
/// filesystem.
pub fn resolve_upload(upload_dir: &Path, filename: &str) -> EngineResult<PathBuf> {
    let invalid = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename == "."
        || filename == "..";
    if invalid {
        return Err(EngineError::TimesheetReadError {
            filename: filename.to_string(),
            message: "invalid file name".to_string(),
        });
    }
    Ok(upload_dir.join(filename))
}

/// Reads an uploaded timesheet file into a [`SheetGrid`].
///
/// The decoder is picked by extension: `xlsx`/`xls` via calamine, `csv` via
/// the csv crate. Any other extension (or none at all) is a
/// [`EngineError::TimesheetReadError`], as is a missing or undecodable
/// file.
pub fn read_sheet(path: &Path) -> EngineResult<SheetGrid> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xls" => read_workbook(path),
        "csv" => read_csv(path),
        _ => Err(read_error(
            path,
            format!("unsupported timesheet format '{extension}'"),
        )),
    }
}
