//! HTTP API module for the Invoice Generation Engine.
//!
//! This module provides the REST API endpoints for registering companies,
//! generating invoices from uploaded timesheets, and downloading the
//! rendered documents.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompanyRequest, EmployeeRequest, GenerateInvoiceRequest, PurchaseOrderRequest};
pub use response::{
    ApiError, ApiErrorResponse, CompanyDetailResponse, CompanyListEntry, DeleteCompanyResponse,
    GenerateInvoiceResponse, HealthResponse, InvoiceSummaryResponse,
};
pub use state::AppState;
