//! Hour entry normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static DECIMAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("hour number pattern is valid"));

/// Normalizes one raw hour entry to a decimal hour count.
///
/// Timesheets carry hours in several shapes: plain numbers (`"8"`, `"7.5"`),
/// annotated text (`"8 hours"`, `"Hours worked: 7.5"`) and noise
/// (`"absent"`, blanks). The rules, in order:
///
/// 1. blank after trimming → zero;
/// 2. text containing `hour` (case-insensitive) → the first decimal number
///    found in it, or zero when it has none;
/// 3. otherwise a direct decimal parse (scientific notation accepted),
///    falling back to zero.
///
/// Normalization never fails; unusable input is worth zero hours.
///
/// # Example
///
/// ```
/// use invoice_engine::timesheet::normalize_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(normalize_hours("8 hours"), Decimal::new(8, 0));
/// assert_eq!(normalize_hours("7.5"), Decimal::new(75, 1));
/// assert_eq!(normalize_hours("absent"), Decimal::ZERO);
/// ```
pub fn normalize_hours(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let lowered = trimmed.to_lowercase();
    if lowered.contains("hour") {
        return DECIMAL_NUMBER
            .find(&lowered)
            .and_then(|m| Decimal::from_str(m.as_str()).ok())
            .unwrap_or(Decimal::ZERO);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}
