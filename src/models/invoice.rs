//! Invoice record and per-file batch outcome models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::billing::{BillingResult, GrandTotal};

/// The priced summary of one successfully processed timesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetSummary {
    /// Employee name extracted from the sheet header.
    pub employee_name: String,
    /// Work location extracted from the sheet header; may be empty.
    #[serde(default)]
    pub location: String,
    /// The calculator output for this timesheet.
    pub billing: BillingResult,
}

/// The outcome recorded for one file of a generation batch.
///
/// A failed file never aborts its siblings; it is carried through to the
/// response as an error entry and excluded from the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file parsed and priced successfully.
    Processed {
        /// The uploaded file name.
        filename: String,
        /// The priced summary.
        summary: TimesheetSummary,
    },
    /// The file could not be read or decoded.
    Failed {
        /// The uploaded file name.
        filename: String,
        /// A human-readable description of the failure.
        error: String,
    },
}

impl FileOutcome {
    /// The uploaded file name this outcome belongs to.
    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Processed { filename, .. } => filename,
            FileOutcome::Failed { filename, .. } => filename,
        }
    }

    /// The summary when the file was processed successfully.
    pub fn summary(&self) -> Option<&TimesheetSummary> {
        match self {
            FileOutcome::Processed { summary, .. } => Some(summary),
            FileOutcome::Failed { .. } => None,
        }
    }
}

/// A persisted invoice record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// The company the invoice was generated for.
    pub company_id: u64,
    /// The purchase order the invoice was generated under.
    pub po_id: u64,
    /// Unique invoice number, `INV-{company}-{po}-{year}{month}-{HHMMSS}`.
    pub invoice_number: String,
    /// Billing month as supplied by the request (e.g. `"07"`).
    pub month: String,
    /// Billing year.
    pub year: i32,
    /// Total base amount across successful timesheets.
    pub total_amount: Decimal,
    /// Total including tax components.
    pub sub_total: Decimal,
    /// Per-file outcomes, successes and failures alike, in request order.
    pub entries: Vec<FileOutcome>,
    /// Field-wise totals across the successful entries.
    pub grand_total: GrandTotal,
    /// When the invoice was generated.
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// The artifact file name the rendered document is stored under.
    ///
    /// # Example
    ///
    /// ```
    /// use invoice_engine::models::Invoice;
    ///
    /// assert_eq!(
    ///     Invoice::artifact_name("INV-1-2-202607-134205"),
    ///     "Invoice_INV-1-2-202607-134205.json"
    /// );
    /// ```
    pub fn artifact_name(invoice_number: &str) -> String {
        format!("Invoice_{invoice_number}.json")
    }
}
