//! Placeholder values for the invoice document.
//!
//! Domestic templates carry the full billing address, tax breakdown and
//! grand totals; the foreign template carries only the header fields and
//! the dollar sub-total. Tokens the selected template does not contain
//! simply go unused, and tokens in the template with no entry here stay
//! literal.

use chrono::{DateTime, Utc};

use crate::calculation::format_currency;
use crate::document::PlaceholderMap;
use crate::models::{Company, GrandTotal, PurchaseOrder, TaxKind};

/// Builds the substitution map for one generation batch.
pub(crate) fn build_placeholders(
    company: &Company,
    po: &PurchaseOrder,
    grand: &GrandTotal,
    invoice_number: &str,
    month: &str,
    year: i32,
    created_at: DateTime<Utc>,
) -> PlaceholderMap {
    let symbol = company.jurisdiction.currency_symbol();
    let mut placeholders = PlaceholderMap::new();
    placeholders.insert("[Invoice number]", invoice_number);
    placeholders.insert("[Date]", created_at.format("%Y-%m-%d").to_string());
    placeholders.insert("[MM]", month);
    placeholders.insert("[YYYY]", year.to_string());
    placeholders.insert("[PO number]", po.po_number.clone());
    placeholders.insert("[company_name]", company.name.clone());

    if company.jurisdiction.is_domestic() {
        placeholders.insert("[building_no]", company.building_no.clone());
        placeholders.insert("[local_street]", company.local_street.clone());
        placeholders.insert("[city]", company.city.clone());
        placeholders.insert("[state]", company.state.clone());
        placeholders.insert("[country]", company.country.clone());
        placeholders.insert("[GST]", company.gst.clone().unwrap_or_default());
        placeholders.insert("[SAC]", company.sac.clone().unwrap_or_default());
        placeholders.insert("[sub_total]", format_currency(symbol, grand.base_amount));
        placeholders.insert(
            "[CGST]",
            format_currency(symbol, grand.tax_amount(TaxKind::Cgst)),
        );
        placeholders.insert(
            "[SGST]",
            format_currency(symbol, grand.tax_amount(TaxKind::Sgst)),
        );
        placeholders.insert(
            "[IGST]",
            format_currency(symbol, grand.tax_amount(TaxKind::Igst)),
        );
        placeholders.insert("[TIA]", format_currency(symbol, grand.sub_total));
    } else {
        placeholders.insert("[ST]", format_currency(symbol, grand.sub_total));
    }
    placeholders
}
