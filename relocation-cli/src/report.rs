//! Plain-text rendering of an evaluation.

use std::fmt;

use relocation_core::calculations::Evaluation;
use relocation_core::calculations::common::round_half_up;
use relocation_core::{RateImpact, Runway, ScenarioInputs};
use rust_decimal::Decimal;

const NOT_AVAILABLE: &str = "n/a";

fn money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

fn optional_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn runway(runway: Runway) -> String {
    match runway {
        Runway::Months(months) => format!("{} months", money(months)),
        Runway::Unbounded => "unbounded (no monthly expenses)".to_string(),
    }
}

/// Text report of one evaluated scenario.
pub struct Report<'a> {
    pub name: Option<&'a str>,
    pub inputs: &'a ScenarioInputs,
    pub evaluation: &'a Evaluation,
    pub impact: Option<&'a RateImpact>,
}

impl Report<'_> {
    fn write_header(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let inputs = self.inputs;
        writeln!(
            f,
            "Relocation budget: {} ({} -> {}, destination {})",
            self.name.unwrap_or("unnamed scenario"),
            inputs.origin_currency,
            inputs.destination_currency,
            inputs.destination
        )?;
        match self.evaluation.rate {
            Some(rate) => writeln!(f, "Exchange rate: {rate}")?,
            None => writeln!(f, "Exchange rate: unavailable")?,
        }
        if !inputs.rate.simulation_percent.is_zero() {
            writeln!(f, "Simulation shift: {}%", inputs.rate.simulation_percent)?;
        }
        if !inputs.preferential_regime_active {
            writeln!(f, "Preferential regime: inactive")?;
        }
        writeln!(f)
    }

    fn write_income(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let outcome = &self.evaluation.outcome;
        writeln!(f, "Income ({})", self.inputs.destination_currency)?;
        for result in &outcome.breakdown {
            writeln!(
                f,
                "  {:<16} {:<32} gross {:>12}  tax {:>10}  contribution {:>10}  net {:>12}",
                result.stream_id,
                result.classification.label(),
                money(result.gross),
                money(result.tax),
                money(result.social_contribution),
                money(result.net_income),
            )?;
        }
        writeln!(
            f,
            "  {:<16} {:<32} gross {:>12}  tax {:>10}  contribution {:>10}  net {:>12}",
            "total",
            "",
            money(outcome.total_gross),
            money(outcome.total_tax),
            money(outcome.total_social_contribution),
            money(outcome.total_net_income),
        )?;

        if outcome.has_provisional() {
            writeln!(
                f,
                "  note: one-off inflows use a provisional treatment and may be taxed differently"
            )?;
        }
        if outcome.has_unprocessed() {
            writeln!(
                f,
                "  not included ({} unclassified):",
                money(outcome.unprocessed_total())
            )?;
            for stream in &outcome.unprocessed {
                writeln!(
                    f,
                    "    {} ({}, sourced in {}) {}",
                    stream.id,
                    stream.kind.as_str(),
                    stream.source_jurisdiction,
                    money(stream.amount)
                )?;
            }
        }
        if !self.evaluation.unconverted.is_empty() {
            writeln!(f, "  not included (no exchange rate):")?;
            for declaration in &self.evaluation.unconverted {
                writeln!(
                    f,
                    "    {} {} {}",
                    declaration.id,
                    money(declaration.amount),
                    declaration.currency
                )?;
            }
        }
        writeln!(f)
    }

    fn write_expenses(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let expenses = &self.evaluation.expenses;
        writeln!(f, "Monthly expenses ({})", self.inputs.destination_currency)?;
        for (label, value) in [
            ("Housing", expenses.housing),
            ("Utilities", expenses.utilities),
            ("Transport", expenses.transport),
            ("Healthcare", expenses.healthcare),
            ("Education", expenses.education),
            ("Lifestyle", expenses.lifestyle),
            ("Total", expenses.total),
        ] {
            writeln!(f, "  {:<12} {:>12}", label, money(value))?;
        }
        writeln!(f)
    }

    fn write_summary(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let summary = &self.evaluation.summary;
        writeln!(f, "Summary ({})", self.inputs.destination_currency)?;
        writeln!(
            f,
            "  {:<26} {:>12}",
            "Annual net income",
            money(summary.total_annual_net_income)
        )?;
        writeln!(f, "  {:<26} {:>12}", "Annual expenses", money(summary.total_annual_expenses))?;
        writeln!(f, "  {:<26} {:>12}", "Disposable income", money(summary.disposable))?;
        writeln!(
            f,
            "  {:<26} {:>12}",
            "Required gross income",
            optional_money(summary.required_gross_income)
        )?;
        writeln!(
            f,
            "  {:<26} {}",
            "Emergency runway",
            runway(summary.emergency_runway_months)
        )?;

        if let Some(view) = &summary.origin_currency_view {
            writeln!(f, "  In {} at {}:", view.currency, view.rate)?;
            writeln!(f, "    {:<24} {:>12}", "Annual net income", money(view.annual_net_income))?;
            writeln!(f, "    {:<24} {:>12}", "Annual expenses", money(view.annual_expenses))?;
            writeln!(f, "    {:<24} {:>12}", "Disposable income", money(view.disposable))?;
        }
        Ok(())
    }

    fn write_impact(
        &self,
        f: &mut fmt::Formatter<'_>,
        impact: &RateImpact,
    ) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "Rate impact ({} -> {})",
            impact.baseline_rate, impact.simulated_rate
        )?;
        writeln!(
            f,
            "  {:<26} {:>12} {:>12} {:>12} {:>9}",
            "Metric", "Baseline", "Simulated", "Change", "Change %"
        )?;
        for row in &impact.rows {
            writeln!(
                f,
                "  {:<26} {:>12} {:>12} {:>12} {:>9}",
                row.metric.label(),
                optional_money(row.baseline),
                optional_money(row.simulated),
                optional_money(row.absolute_delta),
                optional_money(row.percent_delta),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.write_header(f)?;
        self.write_income(f)?;
        self.write_expenses(f)?;
        self.write_summary(f)?;
        if let Some(impact) = self.impact {
            self.write_impact(f, impact)?;
        }
        Ok(())
    }
}
