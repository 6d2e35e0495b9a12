//! Parsing of free-text numeric input.
//!
//! Amount fields never reject input: anything unusable becomes zero so the
//! estimate can still be produced. The parsed value feeds the coercion rules
//! in [`super::common`].

use rust_decimal::Decimal;
use tracing::warn;

/// Trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a user-entered amount.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty input is
/// zero. Invalid or negative input is logged and treated as zero.
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    match normalized.parse::<Decimal>() {
        Ok(value) if value < Decimal::ZERO => {
            warn!(input = %s, "negative amount treated as zero");
            Decimal::ZERO
        }
        Ok(value) => value,
        Err(e) => {
            warn!(input = %s, "invalid amount treated as zero: {}", e);
            Decimal::ZERO
        }
    }
}

/// Parses a manually entered exchange rate.
///
/// Returns `None` for empty input and for anything that is not a number
/// strictly greater than zero.
pub fn parse_manual_rate(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse::<Decimal>() {
        Ok(rate) if rate > Decimal::ZERO => Some(rate),
        Ok(rate) => {
            warn!(input = %s, rate = %rate, "manual rate must be greater than zero");
            None
        }
        Err(e) => {
            warn!(input = %s, "invalid manual rate: {}", e);
            None
        }
    }
}
