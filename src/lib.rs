//! Invoice Generation Engine for contract staffing
//!
//! This crate turns monthly employee timesheets into invoice documents. It
//! parses spreadsheet timesheets, prices the worked time under the billing
//! rules of the customer's jurisdiction, and renders an invoice by expanding
//! and substituting a placeholder template document. An axum HTTP API drives
//! generation and manages the company, purchase-order, and invoice records.

#![warn(missing_docs)]

pub mod api;
pub mod assembler;
pub mod calculation;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod store;
pub mod timesheet;
