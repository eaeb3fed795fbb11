//! Employee table row expansion.
//!
//! Invoice templates carry one sentinel row whose cells contain the literal
//! `[name]` token. Expansion fills the first employee record into that row
//! in place, then grows the table for the remaining records by cloning the
//! previous (just-filled) row and inserting the clone immediately after it,
//! so per-column formatting carries down the table. A table with no sentinel
//! row is left unchanged.
//!
//! Which value lands in which cell is data, not code: a [`RowLayout`] maps
//! cell indexes to named fields, one layout per jurisdiction family.

use tracing::warn;

use crate::models::Jurisdiction;

use super::node::{Table, TableRow};

/// The literal token marking the employee template row.
pub const ROW_SENTINEL: &str = "[name]";

/// The fixed "total days" cell value on domestic rows.
pub const FIXED_TOTAL_DAYS: &str = "22";

/// The default "status" cell value on domestic rows.
pub const DEFAULT_ROW_STATUS: &str = "Active";

/// The unit suffix appended to the hourly rate on foreign rows.
pub const USD_RATE_SUFFIX: &str = "USD/hr";

/// A named value slot within an employee row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    /// 1-based position of the employee within the batch.
    SerialNo,
    /// Employee name from the timesheet header.
    Name,
    /// Date of joining from the purchase order roster.
    DateOfJoining,
    /// The fixed [`FIXED_TOTAL_DAYS`] cell.
    TotalDays,
    /// Count of worked days for the month.
    WorkedDays,
    /// Employment status, [`DEFAULT_ROW_STATUS`] unless overridden.
    Status,
    /// Work location from the timesheet header.
    Location,
    /// Currency-formatted base amount for the employee.
    NetAmount,
    /// Total hours for the month, two decimals.
    TotalHours,
    /// Hourly rate, two decimals, rendered with [`USD_RATE_SUFFIX`].
    RatePerHour,
}

/// A cell-index to field mapping for one template family.
#[derive(Debug, Clone, Copy)]
pub struct RowLayout {
    fields: &'static [(usize, RowField)],
}

/// Layout of the 8-cell employee row on domestic (INR) templates.
const DOMESTIC_LAYOUT: RowLayout = RowLayout {
    fields: &[
        (0, RowField::SerialNo),
        (1, RowField::Name),
        (2, RowField::DateOfJoining),
        (3, RowField::TotalDays),
        (4, RowField::WorkedDays),
        (5, RowField::Status),
        (6, RowField::Location),
        (7, RowField::NetAmount),
    ],
};

/// Layout of the 4-cell employee row on the foreign (USD) template.
const FOREIGN_LAYOUT: RowLayout = RowLayout {
    fields: &[
        (0, RowField::Name),
        (1, RowField::TotalHours),
        (2, RowField::RatePerHour),
        (3, RowField::NetAmount),
    ],
};

impl RowLayout {
    /// Returns the row layout used by the given jurisdiction's template.
    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> RowLayout {
        if jurisdiction.is_domestic() {
            DOMESTIC_LAYOUT
        } else {
            FOREIGN_LAYOUT
        }
    }

    /// Builds a row record by picking each mapped field out of `values`.
    pub fn build_row(&self, serial_no: usize, values: &RowValues) -> EmployeeRow {
        let cells = self
            .fields
            .iter()
            .map(|(index, field)| {
                let value = match field {
                    RowField::SerialNo => serial_no.to_string(),
                    RowField::Name => values.name.clone(),
                    RowField::DateOfJoining => values.date_of_joining.clone(),
                    RowField::TotalDays => FIXED_TOTAL_DAYS.to_string(),
                    RowField::WorkedDays => values.worked_days.clone(),
                    RowField::Status => values.status.clone(),
                    RowField::Location => values.location.clone(),
                    RowField::NetAmount => values.net_amount.clone(),
                    RowField::TotalHours => values.total_hours.clone(),
                    RowField::RatePerHour => {
                        format!("{}{}", values.rate_per_hour, USD_RATE_SUFFIX)
                    }
                };
                (*index, value)
            })
            .collect();
        EmployeeRow { serial_no, cells }
    }
}

/// Raw field values for one employee row, pre-formatted for display.
///
/// Fields a layout does not reference are ignored; missing data stays an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValues {
    /// Employee name.
    pub name: String,
    /// Date of joining, verbatim from the roster.
    pub date_of_joining: String,
    /// Worked day count as display text.
    pub worked_days: String,
    /// Status cell text.
    pub status: String,
    /// Location cell text.
    pub location: String,
    /// Currency-formatted net amount.
    pub net_amount: String,
    /// Two-decimal hour total.
    pub total_hours: String,
    /// Two-decimal hourly rate, without the unit suffix.
    pub rate_per_hour: String,
}

impl Default for RowValues {
    fn default() -> Self {
        RowValues {
            name: String::new(),
            date_of_joining: String::new(),
            worked_days: String::new(),
            status: DEFAULT_ROW_STATUS.to_string(),
            location: String::new(),
            net_amount: String::new(),
            total_hours: String::new(),
            rate_per_hour: String::new(),
        }
    }
}

/// One employee row ready to be written into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    /// 1-based position of the employee within the batch.
    pub serial_no: usize,
    /// `(cell_index, value)` pairs in layout order.
    pub cells: Vec<(usize, String)>,
}

fn find_template_row(table: &Table) -> Option<usize> {
    table.rows.iter().position(|row| {
        row.cells
            .iter()
            .any(|cell| cell.text().contains(ROW_SENTINEL))
    })
}

fn fill_row(row: &mut TableRow, record: &EmployeeRow) {
    for (index, value) in &record.cells {
        if let Some(cell) = row.cells.get_mut(*index) {
            cell.set_text(value);
        }
    }
}

/// Expands the employee rows of one table.
///
/// With records present and a sentinel row found, the table ends up with
/// exactly `original_row_count - 1 + records.len()` rows: the sentinel row
/// is consumed by the first record and each further record adds one cloned
/// row. With no records the table is untouched; with no sentinel row a
/// warning is logged and the table is untouched.
pub fn expand_rows(table: &mut Table, records: &[EmployeeRow]) {
    if records.is_empty() {
        return;
    }
    let Some(template_index) = find_template_row(table) else {
        warn!(
            sentinel = ROW_SENTINEL,
            "employee template row not found; table left unchanged"
        );
        return;
    };

    fill_row(&mut table.rows[template_index], &records[0]);
    for (offset, record) in records.iter().enumerate().skip(1) {
        let cloned = table.rows[template_index + offset - 1].clone();
        table.rows.insert(template_index + offset, cloned);
        fill_row(&mut table.rows[template_index + offset], record);
    }
}
