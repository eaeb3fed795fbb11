//! Parsed timesheet model.

use serde::{Deserialize, Serialize};

/// The outcome of parsing one uploaded timesheet.
///
/// A record is immutable once produced by the parser: the calculator reads
/// the raw `entries` (one string per detail row, exactly as extracted from
/// the sheet) and never mutates them. Normalization to numeric hours happens
/// at calculation time so that daily billing can still see which raw cells
/// were present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetRecord {
    /// Employee name from the sheet header (row 1, column 1).
    pub employee_name: String,
    /// Work location from the sheet header (row 3, column 1); empty when
    /// the header does not carry one.
    #[serde(default)]
    pub location: String,
    /// Raw hour entries from the detail column, in sheet order. Rows whose
    /// detail cell was truly empty are dropped before this record is built.
    #[serde(default)]
    pub entries: Vec<String>,
}

impl TimesheetRecord {
    /// Returns true when the sheet had no usable detail rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
