//! Request types for the Invoice Generation Engine API.
//!
//! This module defines the JSON request structures for company creation
//! and invoice generation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assembler::GenerationRequest;
use crate::error::{EngineError, EngineResult};
use crate::models::{Jurisdiction, default_cgst_rate, default_igst_rate, default_sgst_rate};
use crate::store::{NewCompany, NewEmployee, NewPurchaseOrder};

/// Request body for `POST /api/companies`.
///
/// Creates a company together with its purchase orders and their rosters
/// in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    /// Legal company name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub contact_number: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
    /// Building number or name of the billing address.
    #[serde(default)]
    pub building_no: String,
    /// Street of the billing address.
    #[serde(default)]
    pub local_street: String,
    /// City of the billing address.
    #[serde(default)]
    pub city: String,
    /// State of the billing address.
    #[serde(default)]
    pub state: String,
    /// Country of the billing address.
    #[serde(default)]
    pub country: String,
    /// GST registration number, when the company has one.
    #[serde(default)]
    pub gst: Option<String>,
    /// SAC service code, when the company has one.
    #[serde(default)]
    pub sac: Option<String>,
    /// Billing jurisdiction relative to the issuer.
    pub jurisdiction: Jurisdiction,
    /// Purchase orders to create alongside the company.
    #[serde(default)]
    pub po_numbers: Vec<PurchaseOrderRequest>,
}

/// A purchase order within a company creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderRequest {
    /// Purchase order reference issued by the client.
    pub po_number: String,
    /// Monthly budget for daily-rate billing.
    #[serde(default)]
    pub monthly_budget: Option<Decimal>,
    /// Hourly rate for hourly billing.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Integrated GST percentage.
    #[serde(default = "default_igst_rate")]
    pub igst: Decimal,
    /// Central GST percentage.
    #[serde(default = "default_cgst_rate")]
    pub cgst: Decimal,
    /// State GST percentage.
    #[serde(default = "default_sgst_rate")]
    pub sgst: Decimal,
    /// Roster employees attached to this purchase order.
    #[serde(default)]
    pub employees: Vec<EmployeeRequest>,
}

/// A roster employee within a company creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Employee display name.
    pub name: String,
    /// Contact email, if known.
    #[serde(default)]
    pub email: Option<String>,
    /// Date of joining, rendered verbatim on domestic invoice rows.
    #[serde(default)]
    pub date_of_joining: String,
    /// Work location, if known.
    #[serde(default)]
    pub location: Option<String>,
}

/// Request body for `POST /api/invoices/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInvoiceRequest {
    /// The company to invoice.
    pub company_id: u64,
    /// The purchase order to bill under.
    pub po_id: u64,
    /// Billing month, 1 through 12.
    pub month: u32,
    /// Billing year.
    pub year: i32,
    /// Uploaded timesheet file names, one per employee.
    #[serde(default)]
    pub files: Vec<String>,
}

impl CompanyRequest {
    /// Checks the request fields that serde presence checks cannot cover.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] naming the first offending
    /// field: a blank company name, purchase order number or roster
    /// employee name.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidRequest {
                field: "name".to_string(),
                message: "company name must not be blank".to_string(),
            });
        }
        for po in &self.po_numbers {
            if po.po_number.trim().is_empty() {
                return Err(EngineError::InvalidRequest {
                    field: "po_number".to_string(),
                    message: "purchase order number must not be blank".to_string(),
                });
            }
            for employee in &po.employees {
                if employee.name.trim().is_empty() {
                    return Err(EngineError::InvalidRequest {
                        field: "employees.name".to_string(),
                        message: "roster employee name must not be blank".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl From<CompanyRequest> for NewCompany {
    fn from(req: CompanyRequest) -> Self {
        NewCompany {
            name: req.name,
            contact_number: req.contact_number,
            email: req.email,
            building_no: req.building_no,
            local_street: req.local_street,
            city: req.city,
            state: req.state,
            country: req.country,
            gst: req.gst,
            sac: req.sac,
            jurisdiction: req.jurisdiction,
            po_numbers: req.po_numbers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<PurchaseOrderRequest> for NewPurchaseOrder {
    fn from(req: PurchaseOrderRequest) -> Self {
        NewPurchaseOrder {
            po_number: req.po_number,
            monthly_budget: req.monthly_budget,
            hourly_rate: req.hourly_rate,
            igst: req.igst,
            cgst: req.cgst,
            sgst: req.sgst,
            employees: req.employees.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(req: EmployeeRequest) -> Self {
        NewEmployee {
            name: req.name,
            email: req.email,
            date_of_joining: req.date_of_joining,
            location: req.location,
        }
    }
}

impl From<GenerateInvoiceRequest> for GenerationRequest {
    fn from(req: GenerateInvoiceRequest) -> Self {
        GenerationRequest {
            company_id: req.company_id,
            po_id: req.po_id,
            month: req.month,
            year: req.year,
            files: req.files,
        }
    }
}
