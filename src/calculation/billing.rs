//! Billing calculation for parsed timesheets.
//!
//! One timesheet in, one [`BillingResult`] out. Hourly billing sums the
//! normalized hour entries and prices them at the purchase order's hourly
//! rate. Daily billing counts worked days, prices them at the monthly
//! budget divided by the fixed working-day divisor, then applies the
//! jurisdiction's tax components on top. The calculation never fails:
//! missing rates and budgets are worth zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{
    BillingMode, BillingPolicy, BillingResult, Jurisdiction, TaxKind, TimesheetRecord,
};
use crate::timesheet::normalize_hours;

/// Fixed number of billable working days in a month for daily billing.
pub const WORKING_DAYS_PER_MONTH: u32 = 22;

/// Whether a raw hour entry counts as a worked day.
///
/// Presence, not magnitude: any entry that is non-empty after trimming is a
/// worked day, so `"absent"` and `"0"` both count while a blank cell does
/// not.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::counts_as_worked_day;
///
/// assert!(counts_as_worked_day("8 hours"));
/// assert!(counts_as_worked_day("0"));
/// assert!(!counts_as_worked_day("   "));
/// ```
pub fn counts_as_worked_day(raw: &str) -> bool {
    !raw.trim().is_empty()
}

fn percentage_of(base: Decimal, rate: Decimal) -> Decimal {
    base * rate / Decimal::ONE_HUNDRED
}

fn daily_tax_components(base: Decimal, policy: &BillingPolicy) -> BTreeMap<TaxKind, Decimal> {
    let mut components = BTreeMap::new();
    match policy.jurisdiction {
        Jurisdiction::SameState => {
            components.insert(TaxKind::Igst, percentage_of(base, policy.tax_rates.igst));
        }
        Jurisdiction::OtherState => {
            components.insert(TaxKind::Cgst, percentage_of(base, policy.tax_rates.cgst));
            components.insert(TaxKind::Sgst, percentage_of(base, policy.tax_rates.sgst));
        }
        Jurisdiction::Foreign => {}
    }
    components
}

fn calculate_hourly(record: &TimesheetRecord, policy: &BillingPolicy) -> BillingResult {
    let worked_quantity: Decimal = record
        .entries
        .iter()
        .map(|entry| normalize_hours(entry))
        .sum();
    let base_amount = worked_quantity * policy.effective_hourly_rate();

    BillingResult {
        worked_quantity,
        base_amount,
        tax_components: BTreeMap::new(),
        sub_total: base_amount,
    }
}

fn calculate_daily(record: &TimesheetRecord, policy: &BillingPolicy) -> BillingResult {
    let worked_days = record
        .entries
        .iter()
        .filter(|entry| counts_as_worked_day(entry))
        .count();
    let worked_quantity = Decimal::from(worked_days as u64);

    let per_day = policy.effective_monthly_budget() / Decimal::from(WORKING_DAYS_PER_MONTH);
    let base_amount = per_day * worked_quantity;

    let tax_components = daily_tax_components(base_amount, policy);
    let tax_total: Decimal = tax_components.values().copied().sum();

    BillingResult {
        worked_quantity,
        base_amount,
        tax_components,
        sub_total: base_amount + tax_total,
    }
}

/// Prices one timesheet under the given billing policy.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::calculate_billing;
/// use invoice_engine::models::{BillingPolicy, Jurisdiction, PurchaseOrder, TimesheetRecord};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let po = PurchaseOrder {
///     id: 1,
///     company_id: 1,
///     po_number: "PO-2026-001".to_string(),
///     monthly_budget: None,
///     hourly_rate: Some(Decimal::new(50, 0)),
///     igst: Decimal::new(18, 0),
///     cgst: Decimal::new(9, 0),
///     sgst: Decimal::new(9, 0),
///     created_at: Utc::now(),
/// };
/// let policy = BillingPolicy::for_purchase_order(&po, Jurisdiction::Foreign);
/// let record = TimesheetRecord {
///     employee_name: "Alice Mathew".to_string(),
///     location: String::new(),
///     entries: vec!["8 hours".to_string(), "7.5 hours".to_string(), "8".to_string()],
/// };
///
/// let result = calculate_billing(&record, &policy);
/// assert_eq!(result.worked_quantity, Decimal::new(235, 1));
/// assert_eq!(result.base_amount, Decimal::new(1175, 0));
/// ```
pub fn calculate_billing(record: &TimesheetRecord, policy: &BillingPolicy) -> BillingResult {
    match policy.mode {
        BillingMode::Hourly => calculate_hourly(record, policy),
        BillingMode::Daily => calculate_daily(record, policy),
    }
}
