//! Summary metrics derived from the tax outcome and the expense total.
//!
//! Every figure in [`BudgetSummary`] is recomputed from scratch on each
//! evaluation. Amounts are in the destination currency and rounded half-up
//! to two decimal places.

use rust_decimal::Decimal;
use tracing::debug;

use super::common::{input_amount, round_half_up};
use super::income::CurrencyContext;
use super::rate::convert_for_display;
use crate::{
    AggregateTaxOutcome, BudgetSummary, OriginCurrencyView, PreferentialRegime, RateState,
    RequiredGrossFormula, Runway,
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Share of gross income lost to tax and contribution, when the regime has a
/// known inversion.
///
/// Returns `None` when the regime is inactive, when the destination has no
/// configured regime, or when the regime has no `required_gross_formula`.
pub fn effective_burden_rate(
    regime: Option<&PreferentialRegime>,
    preferential_regime_active: bool,
) -> Option<Decimal> {
    if !preferential_regime_active {
        return None;
    }
    let regime = regime?;
    match regime.required_gross_formula? {
        RequiredGrossFormula::FlatLocalEmployment => {
            Some(regime.local_employment_tax_rate + regime.social_contribution_rate)
        }
    }
}

/// Gross income needed so that `expenses` remain after the burden.
///
/// `expenses / (1 - burden)`, or `None` when `burden` is outside `[0, 1)`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use relocation_core::calculations::summary::required_gross_income;
///
/// assert_eq!(required_gross_income(dec!(2000), dec!(0.28)), Some(dec!(2777.78)));
/// assert_eq!(required_gross_income(dec!(2000), dec!(1)), None);
/// ```
pub fn required_gross_income(
    expenses: Decimal,
    burden_rate: Decimal,
) -> Option<Decimal> {
    if burden_rate < Decimal::ZERO || burden_rate >= Decimal::ONE {
        return None;
    }
    Some(round_half_up(expenses / (Decimal::ONE - burden_rate)))
}

/// Months the reserve covers at the current monthly spend.
pub fn emergency_runway_months(
    reserve: Decimal,
    monthly_expenses: Decimal,
) -> Runway {
    if monthly_expenses <= Decimal::ZERO {
        return Runway::Unbounded;
    }
    Runway::Months(round_half_up(reserve / monthly_expenses))
}

/// Derives the budget summary at the effective rate of `rate_state`.
pub fn summarize(
    outcome: &AggregateTaxOutcome,
    monthly_expenses: Decimal,
    rate_state: &RateState,
    reserve: Option<Decimal>,
    burden_rate: Option<Decimal>,
) -> BudgetSummary {
    let context = CurrencyContext {
        origin_currency: rate_state.origin_currency.clone(),
        destination_currency: rate_state.destination_currency.clone(),
        rate: rate_state.effective_rate(),
    };
    summarize_at_rate(outcome, monthly_expenses, &context, reserve, burden_rate)
}

/// Derives the budget summary with the rate carried by `context`.
///
/// The origin-currency view is present only when the two currencies differ
/// and the rate is available.
pub fn summarize_at_rate(
    outcome: &AggregateTaxOutcome,
    monthly_expenses: Decimal,
    context: &CurrencyContext,
    reserve: Option<Decimal>,
    burden_rate: Option<Decimal>,
) -> BudgetSummary {
    let annual_net_income = round_half_up(outcome.total_net_income);
    let annual_expenses = round_half_up(monthly_expenses * MONTHS_PER_YEAR);
    let disposable = annual_net_income - annual_expenses;

    let summary = BudgetSummary {
        total_annual_net_income: annual_net_income,
        total_annual_expenses: annual_expenses,
        disposable,
        required_gross_income: burden_rate
            .and_then(|burden| required_gross_income(annual_expenses, burden)),
        emergency_runway_months: emergency_runway_months(input_amount(reserve), monthly_expenses),
        origin_currency_view: origin_currency_view(
            context,
            annual_net_income,
            annual_expenses,
            disposable,
        ),
    };

    debug!(
        net_income = %summary.total_annual_net_income,
        expenses = %summary.total_annual_expenses,
        disposable = %summary.disposable,
        "derived budget summary"
    );
    summary
}

fn origin_currency_view(
    context: &CurrencyContext,
    annual_net_income: Decimal,
    annual_expenses: Decimal,
    disposable: Decimal,
) -> Option<OriginCurrencyView> {
    if context.origin_currency == context.destination_currency {
        return None;
    }
    let rate = context.rate?;
    let convert = |amount| convert_for_display(amount, Some(rate)).map(round_half_up);

    Some(OriginCurrencyView {
        currency: context.origin_currency.clone(),
        rate,
        annual_net_income: convert(annual_net_income)?,
        annual_expenses: convert(annual_expenses)?,
        disposable: convert(disposable)?,
    })
}
