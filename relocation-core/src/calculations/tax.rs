//! Flat-rate tax calculation under a preferential regime.
//!
//! | Classification                         | Tax rate                    | Contribution               |
//! |----------------------------------------|-----------------------------|----------------------------|
//! | local employment, provisional local    | `local_employment_tax_rate` | `social_contribution_rate` |
//! | foreign pension                        | `foreign_pension_rate`      | none                       |
//! | every other foreign classification     | `default_foreign_rate`      | none                       |
//!
//! Social-security caps, floors and self-employment rates are not modeled;
//! contributions are a flat share of the gross.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use relocation_core::calculations::tax::TaxCalculator;
//! use relocation_core::{
//!     CurrencyCode, IncomeKind, IncomeStream, Jurisdiction, JurisdictionClassification,
//!     PreferentialRegime,
//! };
//!
//! let regime = PreferentialRegime {
//!     jurisdiction: Jurisdiction::new("PT"),
//!     name: "Flat-rate resident regime".to_string(),
//!     local_employment_tax_rate: dec!(0.20),
//!     social_contribution_rate: dec!(0.11),
//!     foreign_pension_rate: dec!(0.10),
//!     default_foreign_rate: dec!(0.00),
//!     required_gross_formula: None,
//! };
//! let stream = IncomeStream {
//!     id: "job".to_string(),
//!     kind: IncomeKind::Salary,
//!     source_jurisdiction: Jurisdiction::new("PT"),
//!     sub_type: None,
//!     amount: dec!(60000),
//!     original_amount: dec!(60000),
//!     original_currency: CurrencyCode::new("EUR"),
//! };
//!
//! let result = TaxCalculator::new(&regime)
//!     .compute_for_stream(&stream, JurisdictionClassification::LocalEmployment);
//!
//! assert_eq!(result.tax, dec!(12000));
//! assert_eq!(result.social_contribution, dec!(6600));
//! assert_eq!(result.net_income, dec!(41400));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::round_half_up;
use crate::calculations::income::IncomeClassifier;
use crate::{
    AggregateTaxOutcome, IncomeStream, Jurisdiction, JurisdictionClassification,
    PreferentialRegime, RegimeTable, TaxResult,
};

/// Applies one regime's flat rates to classified streams.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    regime: &'a PreferentialRegime,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(regime: &'a PreferentialRegime) -> Self {
        Self { regime }
    }

    /// Computes tax, contribution and net income for one stream.
    ///
    /// A stream with `amount <= 0` yields an all-zero result.
    pub fn compute_for_stream(
        &self,
        stream: &IncomeStream,
        classification: JurisdictionClassification,
    ) -> TaxResult {
        if stream.amount <= Decimal::ZERO {
            return TaxResult {
                stream_id: stream.id.clone(),
                gross: Decimal::ZERO,
                tax: Decimal::ZERO,
                social_contribution: Decimal::ZERO,
                net_income: Decimal::ZERO,
                classification,
            };
        }

        let (tax_rate, contribution_rate) = self.rates_for(classification);
        let gross = stream.amount;
        let tax = round_half_up(gross * tax_rate);
        let social_contribution = round_half_up(gross * contribution_rate);
        let net_income = gross - tax - social_contribution;

        debug!(
            id = %stream.id,
            classification = classification.label(),
            gross = %gross,
            tax = %tax,
            social_contribution = %social_contribution,
            net_income = %net_income,
            "computed stream tax"
        );

        TaxResult {
            stream_id: stream.id.clone(),
            gross,
            tax,
            social_contribution,
            net_income,
            classification,
        }
    }

    /// Tax rate and contribution rate for a classification.
    fn rates_for(
        &self,
        classification: JurisdictionClassification,
    ) -> (Decimal, Decimal) {
        match classification {
            JurisdictionClassification::LocalEmployment
            | JurisdictionClassification::ProvisionalLocalOneOff => (
                self.regime.local_employment_tax_rate,
                self.regime.social_contribution_rate,
            ),
            JurisdictionClassification::ForeignPension => {
                (self.regime.foreign_pension_rate, Decimal::ZERO)
            }
            JurisdictionClassification::ForeignEmployment
            | JurisdictionClassification::ForeignDividend
            | JurisdictionClassification::ForeignInterest
            | JurisdictionClassification::ForeignRental
            | JurisdictionClassification::ForeignOtherPassive
            | JurisdictionClassification::ProvisionalForeignOneOff => {
                (self.regime.default_foreign_rate, Decimal::ZERO)
            }
        }
    }
}

/// Classifies and taxes every stream for `destination`.
///
/// Streams that cannot be classified, and every stream when the regime is
/// inactive or the destination has no configured regime, end up in
/// `unprocessed` and stay out of the totals. Totals are plain sums of the
/// per-stream figures.
pub fn aggregate(
    streams: Vec<IncomeStream>,
    destination: &Jurisdiction,
    preferential_regime_active: bool,
    regimes: &RegimeTable,
) -> AggregateTaxOutcome {
    let mut outcome = AggregateTaxOutcome::default();

    let regime = regimes.regime_for(destination);
    if preferential_regime_active && regime.is_none() && !streams.is_empty() {
        warn!(
            destination = %destination,
            "no preferential regime configured for destination"
        );
    }

    let classifier = IncomeClassifier::new(destination, preferential_regime_active);
    for stream in streams {
        let taxed = regime.zip(classifier.classify(&stream));
        let Some((regime, classification)) = taxed else {
            warn!(
                id = %stream.id,
                kind = stream.kind.as_str(),
                source = %stream.source_jurisdiction,
                "income stream could not be classified; excluded from totals"
            );
            outcome.unprocessed.push(stream);
            continue;
        };

        let result = TaxCalculator::new(regime).compute_for_stream(&stream, classification);
        outcome.total_gross += result.gross;
        outcome.total_tax += result.tax;
        outcome.total_social_contribution += result.social_contribution;
        outcome.breakdown.push(result);
    }

    outcome.total_net_income =
        outcome.total_gross - outcome.total_tax - outcome.total_social_contribution;
    outcome
}
