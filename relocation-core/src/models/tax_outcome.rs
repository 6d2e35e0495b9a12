use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IncomeStream, JurisdictionClassification};

/// Tax computed for a single classified stream.
///
/// `net_income = gross - tax - social_contribution`. Contribution caps and
/// floors are not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub stream_id: String,
    pub gross: Decimal,
    pub tax: Decimal,
    pub social_contribution: Decimal,
    pub net_income: Decimal,
    pub classification: JurisdictionClassification,
}

/// Totals over every classified stream of one evaluation.
///
/// Streams that could not be classified sit in `unprocessed` and are not
/// part of any total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTaxOutcome {
    pub total_gross: Decimal,
    pub total_tax: Decimal,
    pub total_social_contribution: Decimal,
    pub total_net_income: Decimal,
    pub breakdown: Vec<TaxResult>,
    pub unprocessed: Vec<IncomeStream>,
}

impl AggregateTaxOutcome {
    pub fn has_unprocessed(&self) -> bool {
        !self.unprocessed.is_empty()
    }

    /// Gross amount left out of the totals.
    pub fn unprocessed_total(&self) -> Decimal {
        self.unprocessed.iter().map(|s| s.amount).sum()
    }

    pub fn has_provisional(&self) -> bool {
        self.breakdown
            .iter()
            .any(|r| r.classification.is_provisional())
    }
}
