//! Display formatting for amounts and quantities.
//!
//! Invoice documents carry amounts as text. Formatting rounds to two
//! decimals (banker's rounding), always prints both decimal places, and
//! groups the integer digits of monetary amounts in thousands.

use rust_decimal::Decimal;

fn two_decimals(value: Decimal) -> String {
    let text = value.to_string();
    match text.split_once('.') {
        Some((integer, fraction)) => format!("{integer}.{fraction:0<2}"),
        None => format!("{text}.00"),
    }
}

fn group_thousands(digits: &str) -> String {
    let length = digits.len();
    let mut grouped = String::with_capacity(length + length / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (length - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a quantity (hours, rates) with exactly two decimals.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::format_quantity;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_quantity(Decimal::new(235, 1)), "23.50");
/// ```
pub fn format_quantity(value: Decimal) -> String {
    two_decimals(value.round_dp(2))
}

/// Formats a monetary amount with thousands separators and two decimals.
///
/// The sign, when present, leads the digits: `-1,234.50`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = two_decimals(rounded.abs());
    let (integer, cents) = match text.split_once('.') {
        Some(parts) => parts,
        None => (text.as_str(), "00"),
    };
    format!("{sign}{}.{cents}", group_thousands(integer))
}

/// Formats a monetary amount with its currency symbol prefixed.
///
/// # Example
///
/// ```
/// use invoice_engine::calculation::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency("₹", Decimal::new(472, 0)), "₹472.00");
/// assert_eq!(format_currency("$", Decimal::new(1175, 0)), "$1,175.00");
/// ```
pub fn format_currency(symbol: &str, value: Decimal) -> String {
    format!("{symbol}{}", format_amount(value))
}
