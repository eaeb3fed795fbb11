//! Core data models for the Invoice Generation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing;
mod company;
mod invoice;
mod purchase_order;
mod timesheet;

pub use billing::{BillingMode, BillingPolicy, BillingResult, GrandTotal, TaxKind, TaxRates};
pub use company::{Company, Jurisdiction};
pub use invoice::{FileOutcome, Invoice, TimesheetSummary};
pub use purchase_order::{
    Employee, PurchaseOrder, default_cgst_rate, default_igst_rate, default_sgst_rate,
};
pub use timesheet::TimesheetRecord;
