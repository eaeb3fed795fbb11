//! HTTP request handlers for the Invoice Generation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::fs;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::assembler::generate_invoice;
use crate::error::EngineError;
use crate::models::{Employee, Invoice, PurchaseOrder};
use crate::timesheet::resolve_upload;

use super::request::{CompanyRequest, GenerateInvoiceRequest};
use super::response::{
    ApiError, ApiErrorResponse, CompanyDetailResponse, CompanyListEntry, DeleteCompanyResponse,
    GenerateInvoiceResponse, HealthResponse, InvoiceSummaryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/companies",
            post(create_company_handler).get(list_companies_handler),
        )
        .route(
            "/api/companies/:id",
            get(get_company_handler).delete(delete_company_handler),
        )
        .route(
            "/api/companies/:id/po-numbers",
            get(list_purchase_orders_handler),
        )
        .route("/api/po-numbers/:id/employees", get(list_employees_handler))
        .route("/api/invoices/generate", post(generate_invoice_handler))
        .route("/api/invoices", get(list_invoices_handler))
        .route("/api/invoices/:id", get(get_invoice_handler))
        .route("/api/invoices/:id/document", get(download_document_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to the API error envelope.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for GET /api/health endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for POST /api/companies endpoint.
///
/// Registers a company together with its nested purchase orders and
/// employee rosters.
async fn create_company_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing company registration");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Company registration rejected"
        );
        let api_error: ApiErrorResponse = err.into();
        return (
            api_error.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(api_error.error),
        )
            .into_response();
    }

    let company = state.store().insert_company(request.into());
    let po_numbers = state.store().purchase_orders(company.id).unwrap_or_default();
    info!(
        correlation_id = %correlation_id,
        company_id = company.id,
        po_count = po_numbers.len(),
        "Company registered"
    );
    (
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(CompanyDetailResponse {
            company,
            po_numbers,
        }),
    )
        .into_response()
}

/// Handler for GET /api/companies endpoint.
async fn list_companies_handler(State(state): State<AppState>) -> Json<Vec<CompanyListEntry>> {
    let entries = state
        .store()
        .company_summaries()
        .into_iter()
        .map(CompanyListEntry::from)
        .collect();
    Json(entries)
}

/// Handler for GET /api/companies/:id endpoint.
async fn get_company_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CompanyDetailResponse>, ApiErrorResponse> {
    let company = state.store().company(id)?;
    let po_numbers = state.store().purchase_orders(id)?;
    Ok(Json(CompanyDetailResponse {
        company,
        po_numbers,
    }))
}

/// Handler for DELETE /api/companies/:id endpoint.
///
/// Removes the company with its purchase orders, rosters, and invoices,
/// then deletes the document artifacts and uploaded timesheets that
/// belonged to the removed invoices.
async fn delete_company_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.store().remove_company(id) {
        Ok(removed) => {
            for invoice in &removed {
                let document = state.config().document_path(&invoice.invoice_number);
                let _ = fs::remove_file(&document);
                for entry in &invoice.entries {
                    if let Ok(upload) =
                        resolve_upload(&state.config().upload_dir, entry.filename())
                    {
                        let _ = fs::remove_file(upload);
                    }
                }
            }
            info!(
                correlation_id = %correlation_id,
                company_id = id,
                removed_invoices = removed.len(),
                "Company deleted"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(DeleteCompanyResponse {
                    message: format!("Company {} deleted", id),
                    removed_invoices: removed.len(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                company_id = id,
                error = %err,
                "Company deletion failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /api/companies/:id/po-numbers endpoint.
async fn list_purchase_orders_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<PurchaseOrder>>, ApiErrorResponse> {
    Ok(Json(state.store().purchase_orders(id)?))
}

/// Handler for GET /api/po-numbers/:id/employees endpoint.
async fn list_employees_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Employee>>, ApiErrorResponse> {
    Ok(Json(state.store().employees(id)?))
}

/// Handler for POST /api/invoices/generate endpoint.
///
/// Prices the submitted timesheets, renders the invoice document, and
/// returns the persisted invoice together with per-file outcomes.
async fn generate_invoice_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateInvoiceRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing invoice generation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = json_rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    match generate_invoice(state.store(), state.config(), request.into()) {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                invoice_number = %outcome.invoice.invoice_number,
                grand_total = %outcome.invoice.sub_total,
                duration_us = duration.as_micros(),
                "Invoice generated"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(GenerateInvoiceResponse::from(outcome)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invoice generation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /api/invoices endpoint.
async fn list_invoices_handler(
    State(state): State<AppState>,
) -> Json<Vec<InvoiceSummaryResponse>> {
    let summaries = state
        .store()
        .invoices()
        .into_iter()
        .map(InvoiceSummaryResponse::from)
        .collect();
    Json(summaries)
}

/// Handler for GET /api/invoices/:id endpoint.
async fn get_invoice_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Invoice>, ApiErrorResponse> {
    Ok(Json(state.store().invoice(id)?))
}

/// Handler for GET /api/invoices/:id/document endpoint.
///
/// Streams the rendered document artifact back as a file download.
async fn download_document_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiErrorResponse> {
    let invoice = state.store().invoice(id)?;
    let path = state.config().document_path(&invoice.invoice_number);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| EngineError::DocumentNotFound {
            path: path.display().to_string(),
        })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        Invoice::artifact_name(&invoice.invoice_number)
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
