//! Billing policy and calculation result models.
//!
//! A [`BillingPolicy`] is assembled from a purchase order plus the owning
//! company's jurisdiction and feeds the calculator. The calculator produces
//! one [`BillingResult`] per timesheet; results for a whole generation batch
//! are folded field-wise into a [`GrandTotal`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::company::Jurisdiction;
use super::purchase_order::PurchaseOrder;

/// How worked quantity is measured and priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    /// Sum of normalized hour entries, priced at the hourly rate.
    Hourly,
    /// Count of worked days, priced at the monthly budget divided by the
    /// fixed working-days divisor.
    Daily,
}

/// A named tax component applied on top of the base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxKind {
    /// Central GST, levied for other-state billing.
    Cgst,
    /// State GST, levied for other-state billing.
    Sgst,
    /// Integrated GST, levied for same-state billing.
    Igst,
}

impl std::fmt::Display for TaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxKind::Cgst => write!(f, "CGST"),
            TaxKind::Sgst => write!(f, "SGST"),
            TaxKind::Igst => write!(f, "IGST"),
        }
    }
}

/// Tax rate percentages carried by a billing policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    /// IGST percentage.
    pub igst: Decimal,
    /// CGST percentage.
    pub cgst: Decimal,
    /// SGST percentage.
    pub sgst: Decimal,
}

/// The complete pricing context for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingPolicy {
    /// The jurisdiction the policy was built for; selects the tax branch.
    pub jurisdiction: Jurisdiction,
    /// The billing mode, derived from the jurisdiction.
    pub mode: BillingMode,
    /// Hourly rate for [`BillingMode::Hourly`]; absent is treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// Monthly budget for [`BillingMode::Daily`]; absent is treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Decimal>,
    /// Tax percentages applied on top of the base amount.
    pub tax_rates: TaxRates,
}

impl BillingPolicy {
    /// Builds the policy for a purchase order under the given jurisdiction.
    ///
    /// # Example
    ///
    /// ```
    /// use invoice_engine::models::{BillingMode, BillingPolicy, Jurisdiction, PurchaseOrder};
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    ///
    /// let po = PurchaseOrder {
    ///     id: 1,
    ///     company_id: 1,
    ///     po_number: "PO-2026-001".to_string(),
    ///     monthly_budget: Some(Decimal::new(2200, 0)),
    ///     hourly_rate: None,
    ///     igst: Decimal::new(18, 0),
    ///     cgst: Decimal::new(9, 0),
    ///     sgst: Decimal::new(9, 0),
    ///     created_at: Utc::now(),
    /// };
    ///
    /// let policy = BillingPolicy::for_purchase_order(&po, Jurisdiction::SameState);
    /// assert_eq!(policy.mode, BillingMode::Daily);
    /// assert_eq!(policy.tax_rates.igst, Decimal::new(18, 0));
    /// ```
    pub fn for_purchase_order(po: &PurchaseOrder, jurisdiction: Jurisdiction) -> Self {
        BillingPolicy {
            jurisdiction,
            mode: jurisdiction.billing_mode(),
            hourly_rate: po.hourly_rate,
            monthly_budget: po.monthly_budget,
            tax_rates: TaxRates {
                igst: po.igst,
                cgst: po.cgst,
                sgst: po.sgst,
            },
        }
    }

    /// The hourly rate with the missing-value default applied.
    pub fn effective_hourly_rate(&self) -> Decimal {
        self.hourly_rate.unwrap_or_default()
    }

    /// The monthly budget with the missing-value default applied.
    pub fn effective_monthly_budget(&self) -> Decimal {
        self.monthly_budget.unwrap_or_default()
    }
}

/// The priced outcome of one timesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingResult {
    /// Hours (hourly mode) or worked days (daily mode).
    pub worked_quantity: Decimal,
    /// Quantity times the applicable rate, before tax.
    pub base_amount: Decimal,
    /// Tax components keyed by name; empty for hourly billing.
    #[serde(default)]
    pub tax_components: BTreeMap<TaxKind, Decimal>,
    /// Base amount plus all tax components.
    pub sub_total: Decimal,
}

impl BillingResult {
    /// The amount for one tax component, zero when the component is absent.
    pub fn tax_amount(&self, kind: TaxKind) -> Decimal {
        self.tax_components.get(&kind).copied().unwrap_or_default()
    }

    /// The sum of all tax components.
    pub fn tax_total(&self) -> Decimal {
        self.tax_components.values().copied().sum()
    }
}

/// Field-wise totals across the successful entries of a generation batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrandTotal {
    /// Total hours or worked days across successful timesheets.
    pub worked_quantity: Decimal,
    /// Total base amount before tax.
    pub base_amount: Decimal,
    /// Per-component tax totals; components missing from a result count as
    /// zero.
    #[serde(default)]
    pub tax_components: BTreeMap<TaxKind, Decimal>,
    /// Total of the per-timesheet sub-totals.
    pub sub_total: Decimal,
}

impl GrandTotal {
    /// Folds one billing result into the running totals.
    pub fn accumulate(&mut self, result: &BillingResult) {
        self.worked_quantity += result.worked_quantity;
        self.base_amount += result.base_amount;
        self.sub_total += result.sub_total;
        for (kind, amount) in &result.tax_components {
            *self.tax_components.entry(*kind).or_default() += *amount;
        }
    }

    /// The total for one tax component, zero when never levied.
    pub fn tax_amount(&self, kind: TaxKind) -> Decimal {
        self.tax_components.get(&kind).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn create_test_po() -> PurchaseOrder {
        PurchaseOrder {
            id: 1,
            company_id: 1,
            po_number: "PO-2026-001".to_string(),
            monthly_budget: Some(dec("2200")),
            hourly_rate: Some(dec("50")),
            igst: dec("18"),
            cgst: dec("9"),
            sgst: dec("9"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_policy_mode_follows_jurisdiction() {
        let po = create_test_po();
        let domestic = BillingPolicy::for_purchase_order(&po, Jurisdiction::OtherState);
        assert_eq!(domestic.mode, BillingMode::Daily);

        let foreign = BillingPolicy::for_purchase_order(&po, Jurisdiction::Foreign);
        assert_eq!(foreign.mode, BillingMode::Hourly);
    }

    #[test]
    fn test_missing_rate_and_budget_default_to_zero() {
        let po = PurchaseOrder {
            monthly_budget: None,
            hourly_rate: None,
            ..create_test_po()
        };
        let policy = BillingPolicy::for_purchase_order(&po, Jurisdiction::SameState);
        assert_eq!(policy.effective_hourly_rate(), Decimal::ZERO);
        assert_eq!(policy.effective_monthly_budget(), Decimal::ZERO);
    }

    #[test]
    fn test_tax_kind_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TaxKind::Igst).unwrap(), "\"IGST\"");
        assert_eq!(TaxKind::Cgst.to_string(), "CGST");
    }

    #[test]
    fn test_missing_tax_component_reads_as_zero() {
        let result = BillingResult {
            worked_quantity: dec("4"),
            base_amount: dec("400"),
            tax_components: BTreeMap::from([(TaxKind::Igst, dec("72"))]),
            sub_total: dec("472"),
        };
        assert_eq!(result.tax_amount(TaxKind::Igst), dec("72"));
        assert_eq!(result.tax_amount(TaxKind::Cgst), Decimal::ZERO);
        assert_eq!(result.tax_total(), dec("72"));
    }

    #[test]
    fn test_grand_total_accumulates_field_wise() {
        let mut total = GrandTotal::default();
        total.accumulate(&BillingResult {
            worked_quantity: dec("4"),
            base_amount: dec("400"),
            tax_components: BTreeMap::from([(TaxKind::Igst, dec("72"))]),
            sub_total: dec("472"),
        });
        total.accumulate(&BillingResult {
            worked_quantity: dec("2"),
            base_amount: dec("200"),
            tax_components: BTreeMap::from([(TaxKind::Igst, dec("36"))]),
            sub_total: dec("236"),
        });

        assert_eq!(total.worked_quantity, dec("6"));
        assert_eq!(total.base_amount, dec("600"));
        assert_eq!(total.tax_amount(TaxKind::Igst), dec("108"));
        assert_eq!(total.sub_total, dec("708"));
    }

    #[test]
    fn test_grand_total_treats_absent_components_as_zero() {
        let mut total = GrandTotal::default();
        total.accumulate(&BillingResult {
            worked_quantity: dec("8"),
            base_amount: dec("400"),
            tax_components: BTreeMap::new(),
            sub_total: dec("400"),
        });
        assert_eq!(total.tax_amount(TaxKind::Sgst), Decimal::ZERO);
        assert!(total.tax_components.is_empty());
    }
}
