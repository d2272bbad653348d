//! BRL money text, in both directions.
//!
//! The sheet stores totals the way a Brazilian spreadsheet displays them
//! (`R$ 1.234,56`) and the dashboard shows them back the same way.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Literal prefix stripped on the way in and prepended on the way out.
pub const CURRENCY_MARKER: &str = "R$";

/// Normalises a monetary text field into a `Decimal`.
///
/// Thousands separators (`.`) are removed before the decimal comma becomes a
/// point, so `"1.234,56"` reads as `1234.56`. Anything that still fails to
/// parse is treated as zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .replace(CURRENCY_MARKER, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Formats a value as `R$ 1.234,56`, rounding half away from zero to cents.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{CURRENCY_MARKER} {sign}{},{cents}", group_thousands(integer))
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
