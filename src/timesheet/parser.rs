//! Timesheet sheet parsing.
//!
//! Uploaded timesheets share a fixed layout: a four-row header block with
//! the employee name and work location, a column-header row, then one detail
//! row per day. The parser extracts the header fields, locates the hours
//! column by name and collects its raw values. It never fails: missing
//! header cells fall back to defaults and an unlocatable hours column
//! yields a record with no entries.

use tracing::debug;

use crate::models::TimesheetRecord;

use super::source::SheetGrid;

/// Employee name used when the header cell is absent or blank.
pub const DEFAULT_EMPLOYEE_NAME: &str = "Unknown Employee";

/// Hours column header assumed when no known marker matches.
pub const DEFAULT_HOURS_COLUMN: &str = "Regular hours worked";

// Header block layout: name at (1, 1), location at (3, 1), column headers
// on row 4, detail rows from row 5.
const EMPLOYEE_NAME_ROW: usize = 1;
const LOCATION_ROW: usize = 3;
const HEADER_FIELD_COLUMN: usize = 1;
const DETAIL_HEADER_ROW: usize = 4;
const DETAIL_START_ROW: usize = 5;

const HOURS_COLUMN_MARKERS: [&str; 2] = ["regular hours", "hours worked"];

fn header_cell(grid: &SheetGrid, row: usize, column: usize) -> Option<&str> {
    grid.get(row)
        .and_then(|cells| cells.get(column))
        .map(String::as_str)
}

fn find_hours_column(grid: &SheetGrid) -> Option<usize> {
    let header = grid.get(DETAIL_HEADER_ROW)?;
    header.iter().position(|label| {
        let lowered = label.to_lowercase();
        HOURS_COLUMN_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    })
}

/// Parses one timesheet grid into a [`TimesheetRecord`].
///
/// The employee name comes from row 1, the location from row 3 (both in
/// column 1 of the header block); detail rows whose hours cell is truly
/// empty are dropped. When no column header matches the known markers the
/// [`DEFAULT_HOURS_COLUMN`] is assumed; since no such column exists in
/// that case, every row drops and the record carries zero entries.
///
/// # Example
///
/// ```
/// use invoice_engine::timesheet::parse_timesheet;
///
/// let grid: Vec<Vec<String>> = vec![
///     vec!["Timesheet".into(), "".into()],
///     vec!["Employee".into(), "Alice Mathew".into()],
///     vec!["Month".into(), "July".into()],
///     vec!["Location".into(), "Chennai".into()],
///     vec!["Date".into(), "Regular hours worked".into()],
///     vec!["2026-07-01".into(), "8 hours".into()],
///     vec!["2026-07-02".into(), "".into()],
///     vec!["2026-07-03".into(), "7.5".into()],
/// ];
///
/// let record = parse_timesheet(&grid);
/// assert_eq!(record.employee_name, "Alice Mathew");
/// assert_eq!(record.location, "Chennai");
/// assert_eq!(record.entries, vec!["8 hours", "7.5"]);
/// ```
pub fn parse_timesheet(grid: &SheetGrid) -> TimesheetRecord {
    let employee_name = header_cell(grid, EMPLOYEE_NAME_ROW, HEADER_FIELD_COLUMN)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_EMPLOYEE_NAME)
        .to_string();

    let location = header_cell(grid, LOCATION_ROW, HEADER_FIELD_COLUMN)
        .unwrap_or_default()
        .to_string();

    let entries = match find_hours_column(grid) {
        Some(column) => grid
            .iter()
            .skip(DETAIL_START_ROW)
            .filter_map(|row| row.get(column))
            .filter(|value| !value.is_empty())
            .cloned()
            .collect(),
        None => {
            debug!(
                assumed_column = DEFAULT_HOURS_COLUMN,
                "no hours column header matched; sheet yields no entries"
            );
            Vec::new()
        }
    };

    TimesheetRecord {
        employee_name,
        location,
        entries,
    }
}
