//! Common utility functions for budget calculations.
//!
//! This module provides shared functionality used across the rate, tax,
//! expense and summary calculations: rounding and the coercion of raw user
//! input into non-negative amounts.

use rust_decimal::Decimal;
use tracing::warn;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use relocation_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when it is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use relocation_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(12.50)), dec!(12.50));
/// assert_eq!(floor_at_zero(dec!(-3)), dec!(0));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Coerces an optional user-entered amount to a non-negative figure.
///
/// Missing values count as zero. Negative values are logged and replaced by
/// zero so a single bad field never blocks an estimate.
pub fn input_amount(value: Option<Decimal>) -> Decimal {
    match value {
        Some(v) if v < Decimal::ZERO => {
            warn!(value = %v, "negative input coerced to zero");
            Decimal::ZERO
        }
        Some(v) => v,
        None => Decimal::ZERO,
    }
}

/// Like [`input_amount`], additionally capping the value at 100.
pub fn input_percent(value: Option<Decimal>) -> Decimal {
    let percent = input_amount(value);
    if percent > Decimal::ONE_HUNDRED {
        warn!(value = %percent, "percentage above 100 capped");
        return Decimal::ONE_HUNDRED;
    }
    percent
}

/// `percent` percent of `base`.
pub fn percent_of(
    base: Decimal,
    percent: Decimal,
) -> Decimal {
    base * percent / Decimal::ONE_HUNDRED
}
