//! Response types for the Invoice Generation Engine API.
//!
//! This module defines the error envelope, its mapping from engine errors
//! to HTTP statuses and stable machine-readable codes, and the JSON bodies
//! returned by the listing and generation endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assembler::GenerationOutcome;
use crate::error::EngineError;
use crate::models::{Company, FileOutcome, GrandTotal, Invoice, Jurisdiction, PurchaseOrder};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::DirectoryCreateError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Storage directory error",
                    format!("Failed to create {}: {}", path, message),
                ),
            },
            EngineError::CompanyNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("COMPANY_NOT_FOUND", format!("Company not found: {}", id)),
            },
            EngineError::PurchaseOrderNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "PURCHASE_ORDER_NOT_FOUND",
                    format!("Purchase order not found: {}", id),
                ),
            },
            EngineError::InvoiceNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("INVOICE_NOT_FOUND", format!("Invoice not found: {}", id)),
            },
            EngineError::TemplateNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "TEMPLATE_ERROR",
                    "Invoice template missing",
                    format!("Template not found: {}", path),
                ),
            },
            EngineError::TemplateParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "TEMPLATE_ERROR",
                    "Invoice template unreadable",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::TimesheetReadError { filename, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TIMESHEET_ERROR",
                    format!("Failed to read timesheet '{}'", filename),
                    message,
                ),
            },
            EngineError::DocumentWriteError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DOCUMENT_WRITE_ERROR",
                    "Failed to write invoice document",
                    format!("{}: {}", path, message),
                ),
            },
            EngineError::DocumentNotFound { path } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "DOCUMENT_NOT_FOUND",
                    "Invoice document not found",
                    path,
                ),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains invalid information",
                ),
            },
        }
    }
}

/// Response body for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the service is up.
    pub status: String,
}

impl HealthResponse {
    /// The canonical healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// One row of the `GET /api/companies` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyListEntry {
    /// Company identifier.
    pub id: u64,
    /// Legal company name.
    pub name: String,
    /// Billing jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// Number of purchase orders under the company.
    pub po_count: usize,
    /// When the company record was created.
    pub created_at: DateTime<Utc>,
}

impl From<(Company, usize)> for CompanyListEntry {
    fn from((company, po_count): (Company, usize)) -> Self {
        CompanyListEntry {
            id: company.id,
            name: company.name,
            jurisdiction: company.jurisdiction,
            po_count,
            created_at: company.created_at,
        }
    }
}

/// Response body for company creation and `GET /api/companies/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyDetailResponse {
    /// The company record.
    pub company: Company,
    /// Its purchase orders in insertion order.
    pub po_numbers: Vec<PurchaseOrder>,
}

/// Response body for `DELETE /api/companies/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCompanyResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// How many invoices were removed in the cascade.
    pub removed_invoices: usize,
}

/// One row of the `GET /api/invoices` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSummaryResponse {
    /// Invoice identifier.
    pub id: u64,
    /// Human-readable invoice number.
    pub invoice_number: String,
    /// The invoiced company.
    pub company_id: u64,
    /// The purchase order billed under.
    pub po_id: u64,
    /// Billing month, two digits.
    pub month: String,
    /// Billing year.
    pub year: i32,
    /// Base total across successful timesheets.
    pub total_amount: Decimal,
    /// Total including taxes.
    pub sub_total: Decimal,
    /// Number of file entries on the invoice, failures included.
    pub entry_count: usize,
    /// When the invoice was generated.
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceSummaryResponse {
    fn from(invoice: Invoice) -> Self {
        InvoiceSummaryResponse {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            company_id: invoice.company_id,
            po_id: invoice.po_id,
            month: invoice.month,
            year: invoice.year,
            total_amount: invoice.total_amount,
            sub_total: invoice.sub_total,
            entry_count: invoice.entries.len(),
            created_at: invoice.created_at,
        }
    }
}

/// Response body for `POST /api/invoices/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInvoiceResponse {
    /// Identifier of the persisted invoice record.
    pub invoice_id: u64,
    /// Human-readable invoice number.
    pub invoice_number: String,
    /// The invoiced company's name.
    pub company_name: String,
    /// The invoiced company's jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// The purchase order number billed under.
    pub po_number: String,
    /// Billing month, two digits.
    pub month: String,
    /// Billing year.
    pub year: i32,
    /// Base total across successful timesheets.
    pub total_amount: Decimal,
    /// Total including taxes.
    pub sub_total: Decimal,
    /// Per-file outcomes in request order.
    pub entries: Vec<FileOutcome>,
    /// Field-wise totals across the successful entries.
    pub grand_total: GrandTotal,
    /// File name of the rendered document artifact.
    pub artifact: String,
}

impl From<GenerationOutcome> for GenerateInvoiceResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        let artifact = Invoice::artifact_name(&outcome.invoice.invoice_number);
        GenerateInvoiceResponse {
            invoice_id: outcome.invoice.id,
            invoice_number: outcome.invoice.invoice_number,
            company_name: outcome.company.name,
            jurisdiction: outcome.company.jurisdiction,
            po_number: outcome.purchase_order.po_number,
            month: outcome.invoice.month,
            year: outcome.invoice.year,
            total_amount: outcome.invoice.total_amount,
            sub_total: outcome.invoice.sub_total,
            entries: outcome.invoice.entries,
            grand_total: outcome.invoice.grand_total,
            artifact,
        }
    }
}
