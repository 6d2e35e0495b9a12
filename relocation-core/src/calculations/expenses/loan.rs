//! Fixed-payment amortizing loan calculator.
//!
//! The standard annuity formula gives the monthly payment:
//!
//! ```text
//! payment = P * r / (1 - (1 + r)^-n)
//! ```
//!
//! where `P` is the financed principal, `r` the monthly rate and `n` the
//! number of monthly payments. With `r == 0` the formula divides by zero, so
//! the payment falls back to `P / (years * 12)`. As `n` grows the payment
//! approaches `P * r`, which is also the result when `(1 + r)^n` does not fit
//! in a `Decimal`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use tracing::{debug, warn};

use crate::calculations::common::{input_amount, input_percent, percent_of};

const MONTHS_PER_YEAR: i64 = 12;

/// Principal left to finance after the down payment.
///
/// `down_payment_percent` is capped to `[0, 100]`.
pub fn financed_principal(
    price: Option<Decimal>,
    down_payment_percent: Option<Decimal>,
) -> Decimal {
    let price = input_amount(price);
    let down_payment = percent_of(price, input_percent(down_payment_percent));
    price - down_payment
}

/// Monthly payment of a fixed-rate amortizing loan.
///
/// Returns zero when the principal or term is non-positive or the rate is
/// negative. A zero rate repays the principal in equal instalments.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use relocation_core::calculations::common::round_half_up;
/// use relocation_core::calculations::expenses::loan::amortized_monthly_payment;
///
/// let payment = amortized_monthly_payment(dec!(240000), dec!(3.5), dec!(30));
/// assert_eq!(round_half_up(payment), dec!(1077.71));
///
/// assert_eq!(amortized_monthly_payment(dec!(120000), dec!(0), dec!(10)), dec!(1000));
/// ```
pub fn amortized_monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: Decimal,
) -> Decimal {
    if principal <= Decimal::ZERO || term_years <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if annual_rate_percent < Decimal::ZERO {
        warn!(rate = %annual_rate_percent, "negative loan rate; payment treated as zero");
        return Decimal::ZERO;
    }

    let months = Decimal::from(MONTHS_PER_YEAR);
    let monthly_rate = annual_rate_percent / Decimal::ONE_HUNDRED / months;
    let term_months = term_years.checked_mul(months);

    if monthly_rate.is_zero() {
        // An unrepresentable term spreads the principal to nothing.
        return term_months
            .and_then(|n| principal.checked_div(n))
            .unwrap_or(Decimal::ZERO);
    }

    let interest_only = principal.saturating_mul(monthly_rate);
    let payments = term_months
        .and_then(|n| n.round().to_i64())
        .map(|n| n.max(1));
    let growth = payments.and_then(|n| (Decimal::ONE + monthly_rate).checked_powi(n));
    let Some(growth) = growth else {
        debug!(
            principal = %principal,
            rate = %annual_rate_percent,
            term_years = %term_years,
            "loan growth factor out of range; using interest-only limit"
        );
        return interest_only;
    };

    let denominator = Decimal::ONE - Decimal::ONE / growth;
    if denominator.is_zero() {
        return term_months
            .and_then(|n| principal.checked_div(n))
            .unwrap_or(Decimal::ZERO);
    }

    interest_only.checked_div(denominator).unwrap_or(Decimal::MAX)
}
