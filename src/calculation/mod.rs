//! Calculation logic for the Invoice Generation Engine.
//!
//! This module prices parsed timesheets under a billing policy, covering
//! hourly billing for foreign clients, daily billing against the monthly
//! budget for domestic clients, the jurisdiction-specific tax components,
//! field-wise grand-total aggregation across a batch, and the display
//! formatting of amounts and quantities on the rendered invoice.

mod aggregate;
mod billing;
mod format;

pub use aggregate::aggregate_outcomes;
pub use billing::{WORKING_DAYS_PER_MONTH, calculate_billing, counts_as_worked_day};
pub use format::{format_amount, format_currency, format_quantity};
