use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a decimal string as sent by remote APIs.
///
/// Accepts plain (`"0.070000000000000000"`) and scientific (`"1e-8"`)
/// notation. Returns `None` for anything else.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Converts a JSON float into a decimal, rejecting NaN and infinities.
pub fn parse_decimal_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::try_from(value).ok()
}
