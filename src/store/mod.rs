//! In-memory record store for companies, purchase orders, rosters and
//! generated invoices.
//!
//! The store hands out sequential numeric identifiers and keeps every
//! collection behind a single [`std::sync::RwLock`], so concurrent API
//! requests see a consistent snapshot. Listing methods return records in
//! insertion order; invoices are listed newest first.
//!
//! # Example
//!
//! ```
//! use invoice_engine::models::Jurisdiction;
//! use invoice_engine::store::{NewCompany, RecordStore};
//!
//! let store = RecordStore::new();
//! let company = store.insert_company(NewCompany {
//!     name: "Acme Exports".to_string(),
//!     jurisdiction: Jurisdiction::Foreign,
//!     ..NewCompany::default()
//! });
//! assert_eq!(company.id, 1);
//! assert_eq!(store.company(1).unwrap().name, "Acme Exports");
//! ```

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Company, Employee, FileOutcome, GrandTotal, Invoice, Jurisdiction, PurchaseOrder,
    default_cgst_rate, default_igst_rate, default_sgst_rate,
};

/// Input for creating an employee on a purchase order roster.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    /// Employee display name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
    /// Date of joining, kept as free text for document rendering.
    pub date_of_joining: String,
    /// Work location, if known.
    pub location: Option<String>,
}

/// Input for creating a purchase order together with its roster.
#[derive(Debug, Clone)]
pub struct NewPurchaseOrder {
    /// Purchase order reference issued by the client.
    pub po_number: String,
    /// Monthly budget for daily-rate billing.
    pub monthly_budget: Option<Decimal>,
    /// Hourly rate for hourly billing.
    pub hourly_rate: Option<Decimal>,
    /// Integrated GST percentage.
    pub igst: Decimal,
    /// Central GST percentage.
    pub cgst: Decimal,
    /// State GST percentage.
    pub sgst: Decimal,
    /// Employees attached to this purchase order.
    pub employees: Vec<NewEmployee>,
}

impl Default for NewPurchaseOrder {
    fn default() -> Self {
        Self {
            po_number: String::new(),
            monthly_budget: None,
            hourly_rate: None,
            igst: default_igst_rate(),
            cgst: default_cgst_rate(),
            sgst: default_sgst_rate(),
            employees: Vec::new(),
        }
    }
}

/// Input for creating a company together with its purchase orders.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    /// Legal company name.
    pub name: String,
    /// Contact phone number.
    pub contact_number: String,
    /// Contact email address.
    pub email: String,
    /// Building number or name of the billing address.
    pub building_no: String,
    /// Street of the billing address.
    pub local_street: String,
    /// City of the billing address.
    pub city: String,
    /// State of the billing address.
    pub state: String,
    /// Country of the billing address.
    pub country: String,
    /// GST registration number, when the company has one.
    pub gst: Option<String>,
    /// SAC service code, when the company has one.
    pub sac: Option<String>,
    /// Billing jurisdiction relative to the issuer.
    pub jurisdiction: Jurisdiction,
    /// Purchase orders to create alongside the company.
    pub po_numbers: Vec<NewPurchaseOrder>,
}

/// Input for recording a generated invoice.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    /// Company the invoice was generated for.
    pub company_id: u64,
    /// Purchase order the invoice was generated against.
    pub po_id: u64,
    /// Human-readable invoice number.
    pub invoice_number: String,
    /// Billing month, two digits.
    pub month: String,
    /// Billing year.
    pub year: i32,
    /// Grand total including taxes.
    pub total_amount: Decimal,
    /// Grand total including taxes, as rendered on the document.
    pub sub_total: Decimal,
    /// Per-file processing outcomes.
    pub entries: Vec<FileOutcome>,
    /// Aggregated totals across processed files.
    pub grand_total: GrandTotal,
    /// Generation timestamp; also encoded in the invoice number.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    companies: BTreeMap<u64, Company>,
    purchase_orders: BTreeMap<u64, PurchaseOrder>,
    employees: BTreeMap<u64, Employee>,
    invoices: BTreeMap<u64, Invoice>,
    next_company_id: u64,
    next_po_id: u64,
    next_employee_id: u64,
    next_invoice_id: u64,
}

impl StoreInner {
    fn next_company_id(&mut self) -> u64 {
        self.next_company_id += 1;
        self.next_company_id
    }

    fn next_po_id(&mut self) -> u64 {
        self.next_po_id += 1;
        self.next_po_id
    }

    fn next_employee_id(&mut self) -> u64 {
        self.next_employee_id += 1;
        self.next_employee_id
    }

    fn next_invoice_id(&mut self) -> u64 {
        self.next_invoice_id += 1;
        self.next_invoice_id
    }
}

/// Thread-safe registry of companies, purchase orders, employees and
/// invoices.
#[derive(Debug, Default)]
pub struct RecordStore {
    inner: RwLock<StoreInner>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still guards coherent data for these access
    // patterns, so recover the guard instead of propagating the panic.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a company along with its purchase orders and rosters,
    /// returning the stored company record.
    pub fn insert_company(&self, draft: NewCompany) -> Company {
        let mut inner = self.write();
        let company_id = inner.next_company_id();
        let company = Company {
            id: company_id,
            name: draft.name,
            contact_number: draft.contact_number,
            email: draft.email,
            building_no: draft.building_no,
            local_street: draft.local_street,
            city: draft.city,
            state: draft.state,
            country: draft.country,
            gst: draft.gst,
            sac: draft.sac,
            jurisdiction: draft.jurisdiction,
            created_at: Utc::now(),
        };

        for po_draft in draft.po_numbers {
            let po_id = inner.next_po_id();
            let po = PurchaseOrder {
                id: po_id,
                company_id,
                po_number: po_draft.po_number,
                monthly_budget: po_draft.monthly_budget,
                hourly_rate: po_draft.hourly_rate,
                igst: po_draft.igst,
                cgst: po_draft.cgst,
                sgst: po_draft.sgst,
                created_at: Utc::now(),
            };
            inner.purchase_orders.insert(po_id, po);

            for employee_draft in po_draft.employees {
                let employee_id = inner.next_employee_id();
                let employee = Employee {
                    id: employee_id,
                    po_id,
                    name: employee_draft.name,
                    email: employee_draft.email,
                    date_of_joining: employee_draft.date_of_joining,
                    location: employee_draft.location,
                };
                inner.employees.insert(employee_id, employee);
            }
        }

        inner.companies.insert(company_id, company.clone());
        company
    }

    /// Lists every company with its purchase order count, in insertion
    /// order.
    pub fn company_summaries(&self) -> Vec<(Company, usize)> {
        let inner = self.read();
        inner
            .companies
            .values()
            .map(|company| {
                let po_count = inner
                    .purchase_orders
                    .values()
                    .filter(|po| po.company_id == company.id)
                    .count();
                (company.clone(), po_count)
            })
            .collect()
    }

    /// Fetches a company by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CompanyNotFound`] if no such company exists.
    pub fn company(&self, id: u64) -> EngineResult<Company> {
        self.read()
            .companies
            .get(&id)
            .cloned()
            .ok_or(EngineError::CompanyNotFound { id })
    }

    /// Lists the purchase orders of a company in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CompanyNotFound`] if no such company exists.
    pub fn purchase_orders(&self, company_id: u64) -> EngineResult<Vec<PurchaseOrder>> {
        let inner = self.read();
        if !inner.companies.contains_key(&company_id) {
            return Err(EngineError::CompanyNotFound { id: company_id });
        }
        Ok(inner
            .purchase_orders
            .values()
            .filter(|po| po.company_id == company_id)
            .cloned()
            .collect())
    }

    /// Fetches a purchase order by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PurchaseOrderNotFound`] if no such purchase
    /// order exists.
    pub fn purchase_order(&self, id: u64) -> EngineResult<PurchaseOrder> {
        self.read()
            .purchase_orders
            .get(&id)
            .cloned()
            .ok_or(EngineError::PurchaseOrderNotFound { id })
    }

    /// Lists the roster of a purchase order in insertion order.
    ///
    /// Insertion order is load-bearing: document rendering pairs roster
    /// rows with timesheet results by position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PurchaseOrderNotFound`] if no such purchase
    /// order exists.
    pub fn employees(&self, po_id: u64) -> EngineResult<Vec<Employee>> {
        let inner = self.read();
        if !inner.purchase_orders.contains_key(&po_id) {
            return Err(EngineError::PurchaseOrderNotFound { id: po_id });
        }
        Ok(inner
            .employees
            .values()
            .filter(|employee| employee.po_id == po_id)
            .cloned()
            .collect())
    }

    /// Records a generated invoice and returns the stored record.
    pub fn insert_invoice(&self, draft: NewInvoice) -> Invoice {
        let mut inner = self.write();
        let id = inner.next_invoice_id();
        let invoice = Invoice {
            id,
            company_id: draft.company_id,
            po_id: draft.po_id,
            invoice_number: draft.invoice_number,
            month: draft.month,
            year: draft.year,
            total_amount: draft.total_amount,
            sub_total: draft.sub_total,
            entries: draft.entries,
            grand_total: draft.grand_total,
            created_at: draft.created_at,
        };
        inner.invoices.insert(id, invoice.clone());
        invoice
    }

    /// Lists every invoice, newest first.
    pub fn invoices(&self) -> Vec<Invoice> {
        self.read().invoices.values().rev().cloned().collect()
    }

    /// Fetches an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvoiceNotFound`] if no such invoice exists.
    pub fn invoice(&self, id: u64) -> EngineResult<Invoice> {
        self.read()
            .invoices
            .get(&id)
            .cloned()
            .ok_or(EngineError::InvoiceNotFound { id })
    }

    /// Deletes a company together with its purchase orders, rosters and
    /// invoices, returning the removed invoices so callers can clean up
    /// their rendered documents.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CompanyNotFound`] if no such company exists.
    pub fn remove_company(&self, id: u64) -> EngineResult<Vec<Invoice>> {
        let mut inner = self.write();
        if inner.companies.remove(&id).is_none() {
            return Err(EngineError::CompanyNotFound { id });
        }

        let po_ids: Vec<u64> = inner
            .purchase_orders
            .values()
            .filter(|po| po.company_id == id)
            .map(|po| po.id)
            .collect();
        for po_id in &po_ids {
            inner.purchase_orders.remove(po_id);
        }
        inner
            .employees
            .retain(|_, employee| !po_ids.contains(&employee.po_id));

        let invoice_ids: Vec<u64> = inner
            .invoices
            .values()
            .filter(|invoice| invoice.company_id == id)
            .map(|invoice| invoice.id)
            .collect();
        let mut removed = Vec::with_capacity(invoice_ids.len());
        for invoice_id in invoice_ids {
            if let Some(invoice) = inner.invoices.remove(&invoice_id) {
                removed.push(invoice);
            }
        }
        Ok(removed)
    }
}
