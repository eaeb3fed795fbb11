//! Error types for the Invoice Generation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during invoice generation.

use thiserror::Error;

/// The main error type for the Invoice Generation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. Per-item
/// degradations (malformed hour text, missing optional fields) never surface
/// here; they default to zero or empty values inside the parser and
/// calculator.
///
/// # Example
///
/// ```
/// use invoice_engine::error::EngineError;
///
/// let error = EngineError::CompanyNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Company not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No company record exists for the given id.
    #[error("Company not found: {id}")]
    CompanyNotFound {
        /// The company id that was not found.
        id: u64,
    },

    /// No purchase order record exists for the given id.
    #[error("Purchase order not found: {id}")]
    PurchaseOrderNotFound {
        /// The purchase order id that was not found.
        id: u64,
    },

    /// No invoice record exists for the given id.
    #[error("Invoice not found: {id}")]
    InvoiceNotFound {
        /// The invoice id that was not found.
        id: u64,
    },

    /// Template document was not found for the requested jurisdiction.
    #[error("Template not found: {path}")]
    TemplateNotFound {
        /// The template path that was not found.
        path: String,
    },

    /// Template document exists but could not be parsed.
    #[error("Failed to parse template '{path}': {message}")]
    TemplateParseError {
        /// The path to the template that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A timesheet file could not be read or decoded.
    ///
    /// This is a per-file error: the assembler records it against the file
    /// and continues with the remaining files in the batch.
    #[error("Failed to read timesheet '{filename}': {message}")]
    TimesheetReadError {
        /// The uploaded file name that failed.
        filename: String,
        /// A description of the read or decode failure.
        message: String,
    },

    /// A storage directory could not be created at startup.
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreateError {
        /// The directory path that could not be created.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The rendered invoice document could not be written to storage.
    #[error("Failed to write invoice document '{path}': {message}")]
    DocumentWriteError {
        /// The artifact path that failed to write.
        path: String,
        /// A description of the write failure.
        message: String,
    },

    /// The rendered invoice artifact was not found for download.
    #[error("Invoice document not found: {path}")]
    DocumentNotFound {
        /// The artifact path that was not found.
        path: String,
    },

    /// A generation request was missing a required field.
    #[error("Invalid generation request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
