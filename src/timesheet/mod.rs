//! Timesheet reading, parsing and hour normalization.

mod hours;
mod parser;
mod source;

pub use hours::normalize_hours;
pub use parser::{DEFAULT_EMPLOYEE_NAME, DEFAULT_HOURS_COLUMN, parse_timesheet};
pub use source::{SheetGrid, read_sheet, resolve_upload};
