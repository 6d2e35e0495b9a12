//! End-to-end evaluation of one scenario.
//!
//! ```text
//! declarations -> normalize -> classify/tax -> AggregateTaxOutcome ┐
//! expense inputs -> category costs -> monthly total ---------------┼-> BudgetSummary
//! rate inputs -> baseline -> simulation -> effective rate ---------┘
//! ```
//!
//! Evaluation is pure. The exchange rate is injected so the same inputs can
//! be evaluated at the baseline and at the simulated rate.

use rust_decimal::Decimal;
use tracing::debug;

use super::common::round_half_up;
use super::expenses::ExpenseBreakdown;
use super::income::{CurrencyContext, normalize_declarations};
use super::rate::{apply_simulation, resolve_baseline};
use super::summary::{effective_burden_rate, summarize_at_rate};
use super::tax::aggregate;
use crate::{
    AggregateTaxOutcome, BudgetSummary, ImpactMetric, ImpactRow, IncomeDeclaration, RateImpact,
    RegimeTable, ScenarioInputs,
};

/// Effective rate from raw rate inputs; `None` when no valid rate exists.
pub fn resolve_effective_rate(
    fetched_rate: Option<Decimal>,
    manual_rate: Option<Decimal>,
    override_enabled: bool,
    simulation_percent: Decimal,
) -> Option<Decimal> {
    apply_simulation(
        resolve_baseline(fetched_rate, manual_rate, override_enabled),
        simulation_percent,
    )
}

/// Everything derived from one scenario at one exchange rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub rate: Option<Decimal>,
    pub outcome: AggregateTaxOutcome,
    /// Declarations left out because their currency had no rate.
    pub unconverted: Vec<IncomeDeclaration>,
    pub expenses: ExpenseBreakdown,
    pub monthly_expenses: Decimal,
    pub summary: BudgetSummary,
}

/// Evaluates `inputs` with `rate` as destination units per origin unit.
pub fn evaluate(
    inputs: &ScenarioInputs,
    regimes: &RegimeTable,
    rate: Option<Decimal>,
) -> Evaluation {
    let context = CurrencyContext {
        origin_currency: inputs.origin_currency.clone(),
        destination_currency: inputs.destination_currency.clone(),
        rate,
    };

    let normalized = normalize_declarations(&inputs.incomes, &context);
    let outcome = aggregate(
        normalized.streams,
        &inputs.destination,
        inputs.preferential_regime_active,
        regimes,
    );

    let expenses = ExpenseBreakdown::from_inputs(&inputs.sized_expenses());
    let monthly_expenses = expenses.total;

    let burden_rate = effective_burden_rate(
        regimes.regime_for(&inputs.destination),
        inputs.preferential_regime_active,
    );
    let summary = summarize_at_rate(
        &outcome,
        monthly_expenses,
        &context,
        inputs.emergency_reserve,
        burden_rate,
    );

    Evaluation {
        rate,
        outcome,
        unconverted: normalized.unconverted,
        expenses,
        monthly_expenses,
        summary,
    }
}

/// Evaluates `inputs` at its own effective rate.
pub fn evaluate_current(
    inputs: &ScenarioInputs,
    regimes: &RegimeTable,
) -> Evaluation {
    evaluate(inputs, regimes, inputs.rate_state().effective_rate())
}

/// Compares the scenario at its baseline rate against its simulated rate.
///
/// Returns `None` when the baseline rate is unavailable.
pub fn compare_rate_scenarios(
    inputs: &ScenarioInputs,
    regimes: &RegimeTable,
) -> Option<RateImpact> {
    let state = inputs.rate_state();
    let baseline_rate = state.baseline_rate()?;
    let simulated_rate = state.effective_rate()?;

    let baseline = evaluate(inputs, regimes, Some(baseline_rate)).summary;
    let simulated = evaluate(inputs, regimes, Some(simulated_rate)).summary;

    let rows = [
        ImpactMetric::AnnualNetIncome,
        ImpactMetric::AnnualExpenses,
        ImpactMetric::Disposable,
        ImpactMetric::RequiredGrossIncome,
        ImpactMetric::EmergencyRunwayMonths,
    ]
    .into_iter()
    .map(|metric| {
        impact_row(
            metric,
            metric_value(&baseline, metric),
            metric_value(&simulated, metric),
        )
    })
    .collect();

    debug!(
        baseline_rate = %baseline_rate,
        simulated_rate = %simulated_rate,
        "compared rate scenarios"
    );

    Some(RateImpact {
        baseline_rate,
        simulated_rate,
        rows,
    })
}

fn metric_value(
    summary: &BudgetSummary,
    metric: ImpactMetric,
) -> Option<Decimal> {
    match metric {
        ImpactMetric::AnnualNetIncome => Some(summary.total_annual_net_income),
        ImpactMetric::AnnualExpenses => Some(summary.total_annual_expenses),
        ImpactMetric::Disposable => Some(summary.disposable),
        ImpactMetric::RequiredGrossIncome => summary.required_gross_income,
        ImpactMetric::EmergencyRunwayMonths => summary.emergency_runway_months.months(),
    }
}

fn impact_row(
    metric: ImpactMetric,
    baseline: Option<Decimal>,
    simulated: Option<Decimal>,
) -> ImpactRow {
    let absolute_delta = baseline.zip(simulated).map(|(b, s)| s - b);
    let percent_delta = baseline
        .zip(absolute_delta)
        .filter(|(b, _)| !b.is_zero())
        .map(|(b, delta)| round_half_up(delta / b.abs() * Decimal::ONE_HUNDRED));

    ImpactRow {
        metric,
        baseline,
        simulated,
        absolute_delta,
        percent_delta,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        CurrencyCode, ExpenseInputs, Frequency, HousingExpenses, IncomeKind, Jurisdiction,
        PassiveSubType, PreferentialRegime, RateInputs, RequiredGrossFormula, Runway,
    };

    fn test_regimes() -> RegimeTable {
        RegimeTable::new(vec![PreferentialRegime {
            jurisdiction: Jurisdiction::new("PT"),
            name: "Flat-rate resident regime".to_string(),
            local_employment_tax_rate: dec!(0.20),
            social_contribution_rate: dec!(0.11),
            foreign_pension_rate: dec!(0.10),
            default_foreign_rate: dec!(0),
            required_gross_formula: Some(RequiredGrossFormula::FlatLocalEmployment),
        }])
    }

    fn declaration(
        id: &str,
        kind: IncomeKind,
        source: &str,
        sub_type: Option<PassiveSubType>,
        amount: Decimal,
        currency: &str,
        frequency: Frequency,
    ) -> IncomeDeclaration {
        IncomeDeclaration {
            id: id.to_string(),
            kind,
            source_jurisdiction: Jurisdiction::new(source),
            sub_type,
            amount,
            currency: CurrencyCode::new(currency),
            frequency,
        }
    }

    fn test_inputs() -> ScenarioInputs {
        ScenarioInputs {
            origin_currency: CurrencyCode::new("USD"),
            destination: Jurisdiction::new("PT"),
            destination_currency: CurrencyCode::new("EUR"),
            preferential_regime_active: true,
            household: None,
            incomes: vec![
                declaration(
                    "job",
                    IncomeKind::Salary,
                    "PT",
                    None,
                    dec!(60000),
                    "EUR",
                    Frequency::Annually,
                ),
                declaration(
                    "pension",
                    IncomeKind::Passive,
                    "US",
                    Some(PassiveSubType::Pension),
                    dec!(1000),
                    "USD",
                    Frequency::Monthly,
                ),
            ],
            expenses: ExpenseInputs {
                housing: HousingExpenses {
                    monthly_rent: Some(dec!(1500)),
                    ..HousingExpenses::default()
                },
                ..ExpenseInputs::default()
            },
            emergency_reserve: Some(dec!(9000)),
            rate: RateInputs {
                fetched_rate: Some(dec!(0.90)),
                manual_rate: None,
                override_enabled: false,
                simulation_percent: dec!(10),
            },
        }
    }

    // =========================================================================
    // resolve_effective_rate tests
    // =========================================================================

    #[test]
    fn effective_rate_applies_simulation_to_baseline() {
        assert_eq!(
            resolve_effective_rate(Some(dec!(0.90)), None, false, dec!(10)),
            Some(dec!(0.99))
        );
        assert_eq!(resolve_effective_rate(None, None, true, dec!(10)), None);
    }

    // =========================================================================
    // evaluate tests
    // =========================================================================

    #[test]
    fn evaluate_runs_the_full_pipeline() {
        let evaluation = evaluate(&test_inputs(), &test_regimes(), Some(dec!(0.90)));

        // 41,400 net salary plus 12,000 USD * 0.90 pension taxed at 10%.
        assert_eq!(evaluation.outcome.total_net_income, dec!(51120));
        assert_eq!(evaluation.monthly_expenses, dec!(1500));
        assert!(evaluation.unconverted.is_empty());

        let summary = evaluation.summary;
        assert_eq!(summary.total_annual_expenses, dec!(18000));
        assert_eq!(summary.disposable, dec!(33120));
        assert_eq!(summary.required_gross_income, Some(dec!(26086.96)));
        assert_eq!(summary.emergency_runway_months, Runway::Months(dec!(6)));
        assert_eq!(
            summary.origin_currency_view.map(|view| view.annual_net_income),
            Some(dec!(56800))
        );
    }

    #[test]
    fn evaluate_without_rate_leaves_origin_income_unconverted() {
        let evaluation = evaluate(&test_inputs(), &test_regimes(), None);

        assert_eq!(evaluation.outcome.total_net_income, dec!(41400));
        assert_eq!(evaluation.unconverted.len(), 1);
        assert_eq!(evaluation.unconverted[0].id, "pension");
        assert_eq!(evaluation.summary.origin_currency_view, None);
    }

    #[test]
    fn evaluate_with_inactive_regime_reports_everything_unprocessed() {
        let inputs = ScenarioInputs {
            preferential_regime_active: false,
            ..test_inputs()
        };

        let evaluation = evaluate(&inputs, &test_regimes(), Some(dec!(0.90)));

        assert_eq!(evaluation.outcome.total_net_income, dec!(0));
        assert_eq!(evaluation.outcome.unprocessed.len(), 2);
        assert_eq!(evaluation.summary.required_gross_income, None);
    }

    #[test]
    fn evaluate_sizes_expense_lists_to_household() {
        let mut inputs = test_inputs();
        inputs.household = Some(crate::HouseholdComposition {
            adults: 2,
            children: 1,
            seniors: 0,
        });

        let evaluation = evaluate(&inputs, &test_regimes(), Some(dec!(0.90)));

        assert_eq!(evaluation.monthly_expenses, dec!(1500));
    }

    #[test]
    fn evaluate_current_uses_effective_rate() {
        let evaluation = evaluate_current(&test_inputs(), &test_regimes());

        assert_eq!(evaluation.rate, Some(dec!(0.99)));
    }

    // =========================================================================
    // compare_rate_scenarios tests
    // =========================================================================

    #[test]
    fn rate_impact_reports_deltas_per_metric() {
        let impact = compare_rate_scenarios(&test_inputs(), &test_regimes());

        let Some(impact) = impact else {
            panic!("expected a rate impact table");
        };
        assert_eq!(impact.baseline_rate, dec!(0.90));
        assert_eq!(impact.simulated_rate, dec!(0.99));
        assert_eq!(impact.rows.len(), 5);

        let net = impact.row(ImpactMetric::AnnualNetIncome);
        assert_eq!(
            net,
            Some(&ImpactRow {
                metric: ImpactMetric::AnnualNetIncome,
                baseline: Some(dec!(51120)),
                simulated: Some(dec!(52092)),
                absolute_delta: Some(dec!(972)),
                percent_delta: Some(dec!(1.90)),
            })
        );

        let expenses = impact.row(ImpactMetric::AnnualExpenses);
        assert_eq!(expenses.and_then(|row| row.absolute_delta), Some(dec!(0)));
        assert_eq!(expenses.and_then(|row| row.percent_delta), Some(dec!(0)));
    }

    #[test]
    fn rate_impact_unavailable_without_baseline_rate() {
        let mut inputs = test_inputs();
        inputs.rate.fetched_rate = None;

        assert_eq!(compare_rate_scenarios(&inputs, &test_regimes()), None);
    }

    #[test]
    fn percent_delta_unavailable_for_zero_baseline() {
        let row = impact_row(ImpactMetric::Disposable, Some(dec!(0)), Some(dec!(50)));

        assert_eq!(row.absolute_delta, Some(dec!(50)));
        assert_eq!(row.percent_delta, None);
    }

    #[test]
    fn unbounded_runway_has_no_delta() {
        let row = impact_row(ImpactMetric::EmergencyRunwayMonths, None, None);

        assert_eq!(row.absolute_delta, None);
        assert_eq!(row.percent_delta, None);
    }
}
