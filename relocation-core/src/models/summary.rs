use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyCode;

/// How long the emergency reserve lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "months", rename_all = "snake_case")]
pub enum Runway {
    Months(Decimal),
    /// No monthly expenses, so any reserve meets the target.
    Unbounded,
}

impl Runway {
    pub fn months(&self) -> Option<Decimal> {
        match self {
            Self::Months(months) => Some(*months),
            Self::Unbounded => None,
        }
    }
}

/// Headline figures converted back into the origin currency for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginCurrencyView {
    pub currency: CurrencyCode,
    pub rate: Decimal,
    pub annual_net_income: Decimal,
    pub annual_expenses: Decimal,
    pub disposable: Decimal,
}

/// Planning metrics of one evaluation, in the destination currency.
///
/// Derived fresh on every evaluation and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_annual_net_income: Decimal,
    pub total_annual_expenses: Decimal,
    pub disposable: Decimal,

    /// Gross annual income needed to cover the expenses; `None` when the
    /// destination has no known inverse formula.
    pub required_gross_income: Option<Decimal>,

    pub emergency_runway_months: Runway,

    /// `None` when no exchange rate is available.
    pub origin_currency_view: Option<OriginCurrencyView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactMetric {
    AnnualNetIncome,
    AnnualExpenses,
    Disposable,
    RequiredGrossIncome,
    EmergencyRunwayMonths,
}

impl ImpactMetric {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AnnualNetIncome => "Annual net income",
            Self::AnnualExpenses => "Annual expenses",
            Self::Disposable => "Disposable income",
            Self::RequiredGrossIncome => "Required gross income",
            Self::EmergencyRunwayMonths => "Emergency runway (months)",
        }
    }
}

/// One metric evaluated at the baseline and at the simulated rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRow {
    pub metric: ImpactMetric,
    pub baseline: Option<Decimal>,
    pub simulated: Option<Decimal>,
    pub absolute_delta: Option<Decimal>,
    /// `None` when the baseline is zero or either side is unavailable.
    pub percent_delta: Option<Decimal>,
}

/// Baseline-versus-simulated comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateImpact {
    pub baseline_rate: Decimal,
    pub simulated_rate: Decimal,
    pub rows: Vec<ImpactRow>,
}

impl RateImpact {
    pub fn row(
        &self,
        metric: ImpactMetric,
    ) -> Option<&ImpactRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }
}
