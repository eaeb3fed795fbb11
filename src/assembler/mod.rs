//! Invoice generation: the end-to-end pipeline from uploaded timesheets to
//! a rendered document and a persisted invoice record.
//!
//! One call processes one batch: every named file is independently read,
//! parsed and priced (failures become error entries, never aborts), the
//! grand total is aggregated, the jurisdiction's template is loaded, its
//! tables are expanded with one row per successful timesheet, one
//! substitution pass fills the placeholders, and the rendered document is
//! written out. The invoice record is inserted only after the artifact
//! write succeeds, so a fatal error leaves no partial record behind.
//!
//! # Example
//!
//! ```no_run
//! use invoice_engine::assembler::{GenerationRequest, generate_invoice};
//! use invoice_engine::config::EngineConfig;
//! use invoice_engine::store::RecordStore;
//!
//! let store = RecordStore::new();
//! let config = EngineConfig::default();
//! let request = GenerationRequest {
//!     company_id: 1,
//!     po_id: 1,
//!     month: 7,
//!     year: 2026,
//!     files: vec!["july_alice.xlsx".to_string()],
//! };
//! let outcome = generate_invoice(&store, &config, request).unwrap();
//! println!("generated {}", outcome.invoice.invoice_number);
//! ```

mod placeholders;
mod rows;

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use crate::calculation::{aggregate_outcomes, calculate_billing};
use crate::config::EngineConfig;
use crate::document::{expand_rows, load_template, substitute, write_document};
use crate::error::{EngineError, EngineResult};
use crate::models::{BillingPolicy, Company, FileOutcome, Invoice, PurchaseOrder, TimesheetSummary};
use crate::store::{NewInvoice, RecordStore};
use crate::timesheet::{parse_timesheet, read_sheet, resolve_upload};

/// One invoice generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The company to invoice.
    pub company_id: u64,
    /// The purchase order to bill under; must belong to the company.
    pub po_id: u64,
    /// Billing month, 1 through 12.
    pub month: u32,
    /// Billing year.
    pub year: i32,
    /// Uploaded timesheet file names, one per employee.
    pub files: Vec<String>,
}

/// Everything a caller needs after a successful generation.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The persisted invoice record.
    pub invoice: Invoice,
    /// The invoiced company.
    pub company: Company,
    /// The purchase order billed under.
    pub purchase_order: PurchaseOrder,
}

fn price_file(
    upload_dir: &Path,
    filename: &str,
    policy: &BillingPolicy,
) -> EngineResult<TimesheetSummary> {
    let path = resolve_upload(upload_dir, filename)?;
    let grid = read_sheet(&path)?;
    let record = parse_timesheet(&grid);
    let billing = calculate_billing(&record, policy);
    Ok(TimesheetSummary {
        employee_name: record.employee_name,
        location: record.location,
        billing,
    })
}

fn process_file(upload_dir: &Path, filename: &str, policy: &BillingPolicy) -> FileOutcome {
    match price_file(upload_dir, filename, policy) {
        Ok(summary) => FileOutcome::Processed {
            filename: filename.to_string(),
            summary,
        },
        Err(error) => {
            warn!(filename = %filename, error = %error, "timesheet skipped");
            FileOutcome::Failed {
                filename: filename.to_string(),
                error: error.to_string(),
            }
        }
    }
}

/// Generates one invoice: prices the batch, renders the document, writes
/// the artifact and records the invoice.
///
/// # Errors
///
/// Fatal conditions abort the whole request and leave the store untouched:
/// an unknown company or purchase order, a purchase order belonging to a
/// different company, an out-of-range month, a missing or unparsable
/// template, or an artifact write failure. Per-file problems are not
/// fatal; they surface as error entries on the returned invoice.
pub fn generate_invoice(
    store: &RecordStore,
    config: &EngineConfig,
    request: GenerationRequest,
) -> EngineResult<GenerationOutcome> {
    if request.month == 0 || request.month > 12 {
        return Err(EngineError::InvalidRequest {
            field: "month".to_string(),
            message: format!("month must be between 1 and 12, got {}", request.month),
        });
    }

    let company = store.company(request.company_id)?;
    let po = store.purchase_order(request.po_id)?;
    if po.company_id != company.id {
        return Err(EngineError::PurchaseOrderNotFound { id: po.id });
    }
    let roster = store.employees(po.id)?;
    let policy = BillingPolicy::for_purchase_order(&po, company.jurisdiction);

    let entries: Vec<FileOutcome> = request
        .files
        .iter()
        .map(|filename| process_file(&config.upload_dir, filename, &policy))
        .collect();
    let grand_total = aggregate_outcomes(&entries);

    let created_at = Utc::now();
    let month = format!("{:02}", request.month);
    let invoice_number = format!(
        "INV-{}-{}-{}{}-{}",
        company.id,
        po.id,
        request.year,
        month,
        created_at.format("%H%M%S")
    );

    let mut document = load_template(&config.template_path(company.jurisdiction))?;
    let row_records = rows::build_employee_rows(&entries, &roster, &policy);
    for table in &mut document.tables {
        expand_rows(table, &row_records);
    }
    let placeholders = placeholders::build_placeholders(
        &company,
        &po,
        &grand_total,
        &invoice_number,
        &month,
        request.year,
        created_at,
    );
    substitute(&mut document, &placeholders);

    write_document(&config.document_path(&invoice_number), &document)?;

    let processed = entries.iter().filter(|e| e.summary().is_some()).count();
    let failed = entries.len() - processed;
    let invoice = store.insert_invoice(NewInvoice {
        company_id: company.id,
        po_id: po.id,
        invoice_number: invoice_number.clone(),
        month,
        year: request.year,
        total_amount: grand_total.base_amount,
        sub_total: grand_total.sub_total,
        entries,
        grand_total,
        created_at,
    });
    info!(
        invoice_number = %invoice_number,
        company_id = company.id,
        po_id = po.id,
        processed,
        failed,
        "generated invoice"
    );

    Ok(GenerationOutcome {
        invoice,
        company,
        purchase_order: po,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateFiles;
    use crate::document::{Document, Paragraph, Table, TableRow};
    use crate::models::{GrandTotal, Jurisdiction, TaxKind};
    use crate::store::{NewCompany, NewEmployee, NewPurchaseOrder};
    use rust_decimal::Decimal;
    use std::fs;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn test_config(root: &Path) -> EngineConfig {
        EngineConfig {
            upload_dir: root.join("uploads"),
            documents_dir: root.join("documents"),
            templates_dir: root.join("templates"),
            templates: TemplateFiles::default(),
        }
    }

    fn domestic_template() -> Document {
        Document {
            paragraphs: vec![
                Paragraph::from_text("Invoice No: [Invoice number] dated [Date]"),
                Paragraph::from_text("[company_name], [building_no] [local_street], [city]"),
                Paragraph::from_text("GSTIN: [GST] / SAC: [SAC]"),
                Paragraph::from_text("Period [MM]/[YYYY] under [PO number]"),
            ],
            tables: vec![Table {
                style: None,
                rows: vec![
                    TableRow::from_texts([
                        "S.No", "Name", "DOJ", "Days", "Worked", "Status", "Location", "Amount",
                    ]),
                    TableRow::from_texts(["", "[name]", "", "", "", "", "", ""]),
                    TableRow::from_texts(["", "", "", "", "", "", "Sub Total", "[sub_total]"]),
                    TableRow::from_texts(["", "", "", "", "", "", "IGST", "[IGST]"]),
                    TableRow::from_texts(["", "", "", "", "", "", "Total", "[TIA]"]),
                ],
            }],
        }
    }

    fn foreign_template() -> Document {
        Document {
            paragraphs: vec![Paragraph::from_text(
                "Invoice [Invoice number] for [company_name]",
            )],
            tables: vec![Table {
                style: None,
                rows: vec![
                    TableRow::from_texts(["Name", "Hours", "Rate", "Amount"]),
                    TableRow::from_texts(["[name]", "", "", ""]),
                    TableRow::from_texts(["", "", "Sub Total", "[ST]"]),
                ],
            }],
        }
    }

    fn install_template(config: &EngineConfig, jurisdiction: Jurisdiction, document: &Document) {
        fs::create_dir_all(&config.templates_dir).unwrap();
        fs::write(
            config.template_path(jurisdiction),
            serde_json::to_string_pretty(document).unwrap(),
        )
        .unwrap();
    }

    fn write_timesheet(config: &EngineConfig, filename: &str, name: &str, entries: &[&str]) {
        let mut content = format!(
            "Timesheet,\nEmployee,{name}\nMonth,July\nLocation,Chennai\nDate,Regular hours worked\n"
        );
        for (i, entry) in entries.iter().enumerate() {
            content.push_str(&format!("2026-07-{:02},{entry}\n", i + 1));
        }
        fs::write(config.upload_dir.join(filename), content).unwrap();
    }

    fn seed_company(store: &RecordStore, jurisdiction: Jurisdiction) -> (Company, PurchaseOrder) {
        let company = store.insert_company(NewCompany {
            name: "Sunrise Analytics".to_string(),
            contact_number: "9876543210".to_string(),
            email: "accounts@sunrise.example".to_string(),
            building_no: "12A".to_string(),
            local_street: "Industrial Estate".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            country: "India".to_string(),
            gst: Some("33AAAAA0000A1Z5".to_string()),
            sac: Some("998313".to_string()),
            jurisdiction,
            po_numbers: vec![NewPurchaseOrder {
                po_number: "PO-2026-014".to_string(),
                monthly_budget: Some(dec("2200")),
                hourly_rate: Some(dec("50")),
                employees: vec![
                    NewEmployee {
                        name: "Alice Mathew".to_string(),
                        date_of_joining: "2023-06-01".to_string(),
                        ..NewEmployee::default()
                    },
                    NewEmployee {
                        name: "Rahul Dev".to_string(),
                        date_of_joining: "2024-01-15".to_string(),
                        ..NewEmployee::default()
                    },
                ],
                ..NewPurchaseOrder::default()
            }],
        });
        let po = store.purchase_orders(company.id).unwrap().remove(0);
        (company, po)
    }

    fn read_artifact(config: &EngineConfig, invoice_number: &str) -> Document {
        let content = fs::read_to_string(config.document_path(invoice_number)).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// GEN-001: the full domestic pipeline from CSV timesheets to a
    /// rendered artifact and a persisted record.
    #[test]
    fn test_generates_same_state_invoice_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        config.ensure_directories().unwrap();
        install_template(&config, Jurisdiction::SameState, &domestic_template());
        let store = RecordStore::new();
        let (company, po) = seed_company(&store, Jurisdiction::SameState);
        write_timesheet(
            &config,
            "july_alice.csv",
            "Alice Mathew",
            &["8 hours", "absent", "8 hours", "0"],
        );
        write_timesheet(&config, "july_rahul.csv", "Rahul Dev", &["8 hours", "8 hours"]);

        let outcome = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: company.id,
                po_id: po.id,
                month: 7,
                year: 2026,
                files: vec!["july_alice.csv".to_string(), "july_rahul.csv".to_string()],
            },
        )
        .unwrap();

        let invoice = &outcome.invoice;
        assert!(invoice.invoice_number.starts_with("INV-1-1-202607-"));
        assert_eq!(invoice.month, "07");
        assert_eq!(invoice.year, 2026);
        assert_eq!(invoice.entries.len(), 2);
        assert_eq!(invoice.grand_total.worked_quantity, dec("6"));
        assert_eq!(invoice.grand_total.base_amount, dec("600"));
        assert_eq!(invoice.grand_total.tax_amount(TaxKind::Igst), dec("108"));
        assert_eq!(invoice.grand_total.sub_total, dec("708"));
        assert_eq!(invoice.total_amount, dec("600"));
        assert_eq!(invoice.sub_total, dec("708"));
        assert_eq!(store.invoices().len(), 1);

        let rendered = read_artifact(&config, &invoice.invoice_number);
        assert_eq!(
            rendered.paragraphs[0].text(),
            format!(
                "Invoice No: {} dated {}",
                invoice.invoice_number,
                invoice.created_at.format("%Y-%m-%d")
            )
        );
        assert_eq!(
            rendered.paragraphs[1].text(),
            "Sunrise Analytics, 12A Industrial Estate, Chennai"
        );
        assert_eq!(
            rendered.paragraphs[2].text(),
            "GSTIN: 33AAAAA0000A1Z5 / SAC: 998313"
        );
        assert_eq!(rendered.paragraphs[3].text(), "Period 07/2026 under PO-2026-014");

        let table = &rendered.tables[0];
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.rows[1].cells[1].text(), "Alice Mathew");
        assert_eq!(table.rows[1].cells[2].text(), "2023-06-01");
        assert_eq!(table.rows[1].cells[4].text(), "4");
        assert_eq!(table.rows[1].cells[7].text(), "₹400.00");
        assert_eq!(table.rows[2].cells[1].text(), "Rahul Dev");
        assert_eq!(table.rows[2].cells[7].text(), "₹200.00");
        assert_eq!(table.rows[3].cells[7].text(), "₹600.00");
        assert_eq!(table.rows[4].cells[7].text(), "₹108.00");
        assert_eq!(table.rows[5].cells[7].text(), "₹708.00");
    }

    /// GEN-002: a broken file becomes an error entry, never an abort.
    #[test]
    fn test_unreadable_file_becomes_error_entry() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        config.ensure_directories().unwrap();
        install_template(&config, Jurisdiction::SameState, &domestic_template());
        let store = RecordStore::new();
        let (company, po) = seed_company(&store, Jurisdiction::SameState);
        write_timesheet(&config, "july_alice.csv", "Alice Mathew", &["8 hours"]);

        let outcome = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: company.id,
                po_id: po.id,
                month: 7,
                year: 2026,
                files: vec!["july_alice.csv".to_string(), "ghost.csv".to_string()],
            },
        )
        .unwrap();

        let invoice = &outcome.invoice;
        assert_eq!(invoice.entries.len(), 2);
        assert!(invoice.entries[0].summary().is_some());
        match &invoice.entries[1] {
            FileOutcome::Failed { filename, error } => {
                assert_eq!(filename, "ghost.csv");
                assert!(!error.is_empty());
            }
            other => panic!("Expected a failed entry, got {other:?}"),
        }
        // only the readable sheet contributes to the totals
        assert_eq!(invoice.grand_total.worked_quantity, dec("1"));
        assert_eq!(invoice.grand_total.base_amount, dec("100"));
        assert_eq!(store.invoices().len(), 1);
    }

    #[test]
    fn test_unknown_company_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = RecordStore::new();

        let result = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: 99,
                po_id: 1,
                month: 7,
                year: 2026,
                files: Vec::new(),
            },
        );

        assert!(matches!(
            result,
            Err(EngineError::CompanyNotFound { id: 99 })
        ));
        assert!(store.invoices().is_empty());
    }

    #[test]
    fn test_foreign_purchase_order_of_another_company_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = RecordStore::new();
        let (first, _) = seed_company(&store, Jurisdiction::SameState);
        let (_, other_po) = seed_company(&store, Jurisdiction::Foreign);

        let result = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: first.id,
                po_id: other_po.id,
                month: 7,
                year: 2026,
                files: Vec::new(),
            },
        );

        assert!(matches!(
            result,
            Err(EngineError::PurchaseOrderNotFound { .. })
        ));
    }

    #[test]
    fn test_out_of_range_month_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let store = RecordStore::new();
        let (company, po) = seed_company(&store, Jurisdiction::SameState);

        for month in [0u32, 13] {
            let result = generate_invoice(
                &store,
                &config,
                GenerationRequest {
                    company_id: company.id,
                    po_id: po.id,
                    month,
                    year: 2026,
                    files: Vec::new(),
                },
            );
            match result {
                Err(EngineError::InvalidRequest { field, .. }) => assert_eq!(field, "month"),
                other => panic!("Expected InvalidRequest for month {month}, got {other:?}"),
            }
        }
    }

    /// GEN-003: a missing template aborts the request before anything is
    /// written or recorded.
    #[test]
    fn test_missing_template_leaves_no_record_and_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        config.ensure_directories().unwrap();
        let store = RecordStore::new();
        let (company, po) = seed_company(&store, Jurisdiction::SameState);
        write_timesheet(&config, "july_alice.csv", "Alice Mathew", &["8 hours"]);

        let result = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: company.id,
                po_id: po.id,
                month: 7,
                year: 2026,
                files: vec!["july_alice.csv".to_string()],
            },
        );

        assert!(matches!(result, Err(EngineError::TemplateNotFound { .. })));
        assert!(store.invoices().is_empty());
        assert_eq!(fs::read_dir(&config.documents_dir).unwrap().count(), 0);
    }

    /// GEN-004: the foreign pipeline renders hours, the rate with its unit
    /// suffix, dollar amounts and the [ST] total.
    #[test]
    fn test_generates_foreign_invoice_with_hourly_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        config.ensure_directories().unwrap();
        install_template(&config, Jurisdiction::Foreign, &foreign_template());
        let store = RecordStore::new();
        let (company, po) = seed_company(&store, Jurisdiction::Foreign);
        write_timesheet(
            &config,
            "july_alice.csv",
            "Alice Mathew",
            &["8 hours", "7.5 hours", "8"],
        );

        let outcome = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: company.id,
                po_id: po.id,
                month: 7,
                year: 2026,
                files: vec!["july_alice.csv".to_string()],
            },
        )
        .unwrap();

        let invoice = &outcome.invoice;
        assert_eq!(invoice.grand_total.worked_quantity, dec("23.5"));
        assert_eq!(invoice.grand_total.sub_total, dec("1175.0"));
        assert!(invoice.grand_total.tax_components.is_empty());

        let rendered = read_artifact(&config, &invoice.invoice_number);
        let table = &rendered.tables[0];
        assert_eq!(table.rows[1].cells[0].text(), "Alice Mathew");
        assert_eq!(table.rows[1].cells[1].text(), "23.50");
        assert_eq!(table.rows[1].cells[2].text(), "50.00USD/hr");
        assert_eq!(table.rows[1].cells[3].text(), "$1,175.00");
        assert_eq!(table.rows[2].cells[3].text(), "$1,175.00");
    }

    /// GEN-005: an empty batch still renders a zero-valued document.
    #[test]
    fn test_zero_files_render_a_zero_invoice() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        config.ensure_directories().unwrap();
        install_template(&config, Jurisdiction::SameState, &domestic_template());
        let store = RecordStore::new();
        let (company, po) = seed_company(&store, Jurisdiction::SameState);

        let outcome = generate_invoice(
            &store,
            &config,
            GenerationRequest {
                company_id: company.id,
                po_id: po.id,
                month: 7,
                year: 2026,
                files: Vec::new(),
            },
        )
        .unwrap();

        let invoice = &outcome.invoice;
        assert!(invoice.entries.is_empty());
        assert_eq!(invoice.grand_total, GrandTotal::default());

        let rendered = read_artifact(&config, &invoice.invoice_number);
        let table = &rendered.tables[0];
        // no records: the sentinel row stays, totals render as zero
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[1].cells[1].text(), "[name]");
        assert_eq!(table.rows[2].cells[7].text(), "₹0.00");
        assert_eq!(table.rows[4].cells[7].text(), "₹0.00");
    }
}
