//! Numeric coercion of captured values.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a captured number, rounded to two places.
///
/// Thousands separators, whitespace and a trailing `元`/`份` unit are
/// ignored. Anything else that is not a plain decimal yields `None`, never
/// zero.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches(['元', '份'])
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok().map(|d| d.round_dp(2))
}
