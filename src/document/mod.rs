//! The invoice document model and the operations that render it.
//!
//! This module owns the explicit document tree ([`Document`] and friends),
//! placeholder substitution over that tree, employee table row expansion
//! with its per-jurisdiction cell layouts, and template I/O.

mod expand;
mod node;
mod substitute;
mod template;

pub use expand::{
    DEFAULT_ROW_STATUS, EmployeeRow, FIXED_TOTAL_DAYS, ROW_SENTINEL, RowField, RowLayout,
    RowValues, USD_RATE_SUFFIX, expand_rows,
};
pub use node::{Document, Paragraph, Run, Table, TableCell, TableRow};
pub use substitute::{PlaceholderMap, substitute, substitute_paragraph};
pub use template::{load_template, write_document};
