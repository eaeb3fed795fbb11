//! Company model and the billing jurisdiction it belongs to.
//!
//! The jurisdiction drives everything downstream: which billing mode the
//! calculator runs in, which tax components apply, which invoice template
//! is selected and which currency symbol the document renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::billing::BillingMode;

/// The billing jurisdiction of a client company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Client registered in the same state as the vendor. Billed daily
    /// against the monthly budget with a single IGST component.
    #[default]
    SameState,
    /// Client registered in another state. Billed daily against the monthly
    /// budget with split CGST and SGST components.
    OtherState,
    /// Client outside the country. Billed hourly in USD with no tax
    /// components.
    Foreign,
}

impl Jurisdiction {
    /// Returns the billing mode used for this jurisdiction.
    ///
    /// # Example
    ///
    /// ```
    /// use invoice_engine::models::{BillingMode, Jurisdiction};
    ///
    /// assert_eq!(Jurisdiction::Foreign.billing_mode(), BillingMode::Hourly);
    /// assert_eq!(Jurisdiction::SameState.billing_mode(), BillingMode::Daily);
    /// ```
    pub fn billing_mode(&self) -> BillingMode {
        match self {
            Jurisdiction::Foreign => BillingMode::Hourly,
            Jurisdiction::SameState | Jurisdiction::OtherState => BillingMode::Daily,
        }
    }

    /// Returns the currency symbol rendered on invoices for this
    /// jurisdiction.
    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Jurisdiction::Foreign => "$",
            Jurisdiction::SameState | Jurisdiction::OtherState => "₹",
        }
    }

    /// Returns true for the domestic jurisdictions (daily billing, INR).
    pub fn is_domestic(&self) -> bool {
        !matches!(self, Jurisdiction::Foreign)
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Jurisdiction::SameState => write!(f, "same_state"),
            Jurisdiction::OtherState => write!(f, "other_state"),
            Jurisdiction::Foreign => write!(f, "foreign"),
        }
    }
}

/// A client company that invoices are generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier assigned by the record store.
    pub id: u64,
    /// Registered company name.
    pub name: String,
    /// Contact phone number.
    pub contact_number: String,
    /// Billing contact email address.
    pub email: String,
    /// Building number of the registered address.
    pub building_no: String,
    /// Street of the registered address.
    pub local_street: String,
    /// City of the registered address.
    pub city: String,
    /// State of the registered address.
    pub state: String,
    /// Country of the registered address.
    pub country: String,
    /// GST registration number; absent for unregistered or foreign clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
    /// SAC service code; absent when not applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sac: Option<String>,
    /// Billing jurisdiction of the company.
    pub jurisdiction: Jurisdiction,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
