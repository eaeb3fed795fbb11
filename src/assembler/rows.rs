//! Employee row records for the invoice table.
//!
//! Each successfully processed timesheet becomes one row record, laid out
//! for the jurisdiction's template family. Failed files produce no row.
//! The date of joining comes from the purchase order roster, paired with
//! the successes by position; when the roster is shorter the cell stays
//! blank.

use crate::calculation::{format_currency, format_quantity};
use crate::document::{EmployeeRow, RowLayout, RowValues};
use crate::models::{BillingPolicy, Employee, FileOutcome};

/// Builds the table row records for a generation batch.
pub(crate) fn build_employee_rows(
    entries: &[FileOutcome],
    roster: &[Employee],
    policy: &BillingPolicy,
) -> Vec<EmployeeRow> {
    let layout = RowLayout::for_jurisdiction(policy.jurisdiction);
    let symbol = policy.jurisdiction.currency_symbol();
    let rate = format_quantity(policy.effective_hourly_rate());

    entries
        .iter()
        .filter_map(FileOutcome::summary)
        .enumerate()
        .map(|(index, summary)| {
            let values = RowValues {
                name: summary.employee_name.clone(),
                date_of_joining: roster
                    .get(index)
                    .map(|employee| employee.date_of_joining.clone())
                    .unwrap_or_default(),
                worked_days: summary.billing.worked_quantity.to_string(),
                location: summary.location.clone(),
                net_amount: format_currency(symbol, summary.billing.base_amount),
                total_hours: format_quantity(summary.billing.worked_quantity),
                rate_per_hour: rate.clone(),
                ..RowValues::default()
            };
            layout.build_row(index + 1, &values)
        })
        .collect()
}
