//! Purchase order and roster employee models.
//!
//! A purchase order carries the commercial terms a batch of timesheets is
//! billed under: the monthly budget for daily billing, the hourly rate for
//! foreign clients, and the tax percentages applied on top of the base
//! amount. Each purchase order owns a roster of employees used to fill the
//! per-employee rows of the invoice document.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default IGST percentage applied to same-state purchase orders.
pub fn default_igst_rate() -> Decimal {
    Decimal::new(18, 0)
}

/// Default CGST percentage applied to other-state purchase orders.
pub fn default_cgst_rate() -> Decimal {
    Decimal::new(9, 0)
}

/// Default SGST percentage applied to other-state purchase orders.
pub fn default_sgst_rate() -> Decimal {
    Decimal::new(9, 0)
}

/// Commercial terms for one engagement under a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// The company this purchase order belongs to.
    pub company_id: u64,
    /// The client-facing purchase order number.
    pub po_number: String,
    /// Monthly budget for daily billing; absent is treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Decimal>,
    /// Hourly rate for foreign billing; absent is treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// IGST percentage for same-state billing.
    #[serde(default = "default_igst_rate")]
    pub igst: Decimal,
    /// CGST percentage for other-state billing.
    #[serde(default = "default_cgst_rate")]
    pub cgst: Decimal,
    /// SGST percentage for other-state billing.
    #[serde(default = "default_sgst_rate")]
    pub sgst: Decimal,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// A roster employee attached to a purchase order.
///
/// Roster entries supply the date of joining shown on domestic invoice
/// rows; they are paired positionally with the parsed timesheets of a
/// generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// The purchase order this employee is rostered under.
    pub po_id: u64,
    /// Employee name.
    pub name: String,
    /// Contact email, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of joining as free text (rendered verbatim on the invoice).
    #[serde(default)]
    pub date_of_joining: String,
    /// Work location, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
