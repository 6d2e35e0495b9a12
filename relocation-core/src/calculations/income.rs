//! Income normalization and classification.
//!
//! Declarations arrive in any currency and at any frequency. They are first
//! normalized into annualized, destination-currency [`IncomeStream`]s and
//! then classified into a [`JurisdictionClassification`] that selects the
//! tax rule.
//!
//! # Classification rules
//!
//! | Kind    | Sourced in destination   | Sourced elsewhere                 |
//! |---------|--------------------------|-----------------------------------|
//! | Salary  | local employment         | foreign employment                |
//! | Passive | not classifiable         | foreign pension/dividend/...      |
//! | One-off | provisional local        | provisional foreign               |
//!
//! Locally sourced passive income needs ordinary (non-preferential) rules,
//! which this engine does not model, so it is left unclassified. A passive
//! stream without a declared sub-type is also left unclassified.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{input_amount, round_half_up};
use crate::{
    CurrencyCode, IncomeDeclaration, IncomeKind, IncomeStream, Jurisdiction,
    JurisdictionClassification, PassiveSubType,
};

/// Currencies involved in one evaluation and the rate between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyContext {
    pub origin_currency: CurrencyCode,
    pub destination_currency: CurrencyCode,
    /// Destination units per origin unit; `None` when unavailable.
    pub rate: Option<Decimal>,
}

impl CurrencyContext {
    /// Factor converting one unit of `currency` into the destination currency.
    fn conversion_factor(
        &self,
        currency: &CurrencyCode,
    ) -> Option<Decimal> {
        if currency == &self.destination_currency {
            Some(Decimal::ONE)
        } else if currency == &self.origin_currency {
            self.rate
        } else {
            None
        }
    }
}

/// Result of normalizing a batch of declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedIncome {
    pub streams: Vec<IncomeStream>,
    /// Declarations whose currency could not be converted.
    pub unconverted: Vec<IncomeDeclaration>,
}

/// Normalizes one declaration, or returns `None` when no conversion rate is
/// available for its currency.
///
/// Negative amounts are coerced to zero. One-off declarations are taken as a
/// single inflow within the year regardless of their frequency.
pub fn normalize_declaration(
    declaration: &IncomeDeclaration,
    context: &CurrencyContext,
) -> Option<IncomeStream> {
    let factor = context.conversion_factor(&declaration.currency)?;
    let original = input_amount(Some(declaration.amount));
    let annual = match declaration.kind {
        IncomeKind::OneOff => original,
        IncomeKind::Salary | IncomeKind::Passive => declaration.frequency.annualize(original),
    };

    Some(IncomeStream {
        id: declaration.id.clone(),
        kind: declaration.kind,
        source_jurisdiction: declaration.source_jurisdiction.clone(),
        sub_type: declaration.sub_type,
        amount: round_half_up(annual * factor),
        original_amount: declaration.amount,
        original_currency: declaration.currency.clone(),
    })
}

/// Normalizes every declaration, keeping those that cannot be converted.
pub fn normalize_declarations(
    declarations: &[IncomeDeclaration],
    context: &CurrencyContext,
) -> NormalizedIncome {
    let mut normalized = NormalizedIncome::default();
    for declaration in declarations {
        match normalize_declaration(declaration, context) {
            Some(stream) => normalized.streams.push(stream),
            None => {
                warn!(
                    id = %declaration.id,
                    currency = %declaration.currency,
                    "no exchange rate for income declaration; left unconverted"
                );
                normalized.unconverted.push(declaration.clone());
            }
        }
    }
    normalized
}

/// Classifies income streams for one destination.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use relocation_core::calculations::income::IncomeClassifier;
/// use relocation_core::{
///     CurrencyCode, IncomeKind, IncomeStream, Jurisdiction, JurisdictionClassification,
/// };
///
/// let destination = Jurisdiction::new("PT");
/// let classifier = IncomeClassifier::new(&destination, true);
///
/// let salary = IncomeStream {
///     id: "job".to_string(),
///     kind: IncomeKind::Salary,
///     source_jurisdiction: Jurisdiction::new("PT"),
///     sub_type: None,
///     amount: dec!(60000),
///     original_amount: dec!(60000),
///     original_currency: CurrencyCode::new("EUR"),
/// };
///
/// assert_eq!(
///     classifier.classify(&salary),
///     Some(JurisdictionClassification::LocalEmployment)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct IncomeClassifier<'a> {
    destination: &'a Jurisdiction,
    preferential_regime_active: bool,
}

impl<'a> IncomeClassifier<'a> {
    pub fn new(
        destination: &'a Jurisdiction,
        preferential_regime_active: bool,
    ) -> Self {
        Self {
            destination,
            preferential_regime_active,
        }
    }

    /// Returns the classification of `stream`, or `None` when no
    /// preferential rule applies.
    pub fn classify(
        &self,
        stream: &IncomeStream,
    ) -> Option<JurisdictionClassification> {
        if !self.preferential_regime_active {
            return None;
        }

        let local = &stream.source_jurisdiction == self.destination;
        let classification = match (stream.kind, local) {
            (IncomeKind::Salary, true) => Some(JurisdictionClassification::LocalEmployment),
            (IncomeKind::Salary, false) => Some(JurisdictionClassification::ForeignEmployment),
            (IncomeKind::Passive, true) => None,
            (IncomeKind::Passive, false) => Self::foreign_passive(stream.sub_type),
            (IncomeKind::OneOff, true) => Some(JurisdictionClassification::ProvisionalLocalOneOff),
            (IncomeKind::OneOff, false) => {
                Some(JurisdictionClassification::ProvisionalForeignOneOff)
            }
        };

        debug!(
            id = %stream.id,
            kind = stream.kind.as_str(),
            source = %stream.source_jurisdiction,
            classification = ?classification,
            "classified income stream"
        );
        classification
    }

    fn foreign_passive(sub_type: Option<PassiveSubType>) -> Option<JurisdictionClassification> {
        match sub_type {
            Some(PassiveSubType::Pension) => Some(JurisdictionClassification::ForeignPension),
            Some(PassiveSubType::Dividend) => Some(JurisdictionClassification::ForeignDividend),
            Some(PassiveSubType::Interest) => Some(JurisdictionClassification::ForeignInterest),
            Some(PassiveSubType::Rental) => Some(JurisdictionClassification::ForeignRental),
            Some(PassiveSubType::Other) => Some(JurisdictionClassification::ForeignOtherPassive),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::Frequency;

    fn test_context() -> CurrencyContext {
        CurrencyContext {
            origin_currency: CurrencyCode::new("USD"),
            destination_currency: CurrencyCode::new("EUR"),
            rate: Some(dec!(0.90)),
        }
    }

    fn declaration(
        kind: IncomeKind,
        source: &str,
        amount: Decimal,
        currency: &str,
        frequency: Frequency,
    ) -> IncomeDeclaration {
        IncomeDeclaration {
            id: "income-1".to_string(),
            kind,
            source_jurisdiction: Jurisdiction::new(source),
            sub_type: None,
            amount,
            currency: CurrencyCode::new(currency),
            frequency,
        }
    }

    fn stream(
        kind: IncomeKind,
        source: &str,
        sub_type: Option<PassiveSubType>,
    ) -> IncomeStream {
        IncomeStream {
            id: "stream-1".to_string(),
            kind,
            source_jurisdiction: Jurisdiction::new(source),
            sub_type,
            amount: dec!(12000),
            original_amount: dec!(12000),
            original_currency: CurrencyCode::new("EUR"),
        }
    }

    // =========================================================================
    // normalization tests
    // =========================================================================

    #[test]
    fn destination_currency_is_annualized_without_conversion() {
        let decl = declaration(
            IncomeKind::Salary,
            "PT",
            dec!(5000),
            "EUR",
            Frequency::Monthly,
        );

        let result = normalize_declaration(&decl, &test_context()).unwrap();

        assert_eq!(result.amount, dec!(60000));
        assert_eq!(result.original_amount, dec!(5000));
        assert_eq!(result.original_currency, CurrencyCode::new("EUR"));
    }

    #[test]
    fn origin_currency_is_converted_with_rate() {
        let decl = declaration(
            IncomeKind::Passive,
            "US",
            dec!(1000),
            "USD",
            Frequency::Monthly,
        );

        let result = normalize_declaration(&decl, &test_context()).unwrap();

        assert_eq!(result.amount, dec!(10800));
    }

    #[test]
    fn one_off_ignores_frequency() {
        let decl = declaration(
            IncomeKind::OneOff,
            "PT",
            dec!(15000),
            "EUR",
            Frequency::Monthly,
        );

        let result = normalize_declaration(&decl, &test_context()).unwrap();

        assert_eq!(result.amount, dec!(15000));
    }

    #[test]
    fn negative_amount_normalizes_to_zero() {
        let decl = declaration(
            IncomeKind::Salary,
            "PT",
            dec!(-100),
            "EUR",
            Frequency::Monthly,
        );

        let result = normalize_declaration(&decl, &test_context()).unwrap();

        assert_eq!(result.amount, dec!(0));
    }

    #[test]
    fn missing_rate_leaves_origin_currency_unconverted() {
        let context = CurrencyContext {
            rate: None,
            ..test_context()
        };
        let decls = vec![
            declaration(IncomeKind::Salary, "PT", dec!(3000), "EUR", Frequency::Monthly),
            declaration(IncomeKind::Salary, "US", dec!(4000), "USD", Frequency::Monthly),
        ];

        let result = normalize_declarations(&decls, &context);

        assert_eq!(result.streams.len(), 1);
        assert_eq!(result.unconverted.len(), 1);
        assert_eq!(result.unconverted[0].currency, CurrencyCode::new("USD"));
    }

    #[test]
    fn unknown_currency_is_unconverted() {
        let decl = declaration(
            IncomeKind::Salary,
            "GB",
            dec!(3000),
            "GBP",
            Frequency::Monthly,
        );

        assert_eq!(normalize_declaration(&decl, &test_context()), None);
    }

    // =========================================================================
    // classification tests
    // =========================================================================

    #[test]
    fn local_salary_is_local_employment() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, true);

        let result = classifier.classify(&stream(IncomeKind::Salary, "PT", None));

        assert_eq!(result, Some(JurisdictionClassification::LocalEmployment));
    }

    #[test]
    fn foreign_salary_is_foreign_employment() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, true);

        let result = classifier.classify(&stream(IncomeKind::Salary, "US", None));

        assert_eq!(result, Some(JurisdictionClassification::ForeignEmployment));
    }

    #[test]
    fn foreign_passive_dispatches_on_sub_type() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, true);
        let cases = [
            (PassiveSubType::Pension, JurisdictionClassification::ForeignPension),
            (PassiveSubType::Dividend, JurisdictionClassification::ForeignDividend),
            (PassiveSubType::Interest, JurisdictionClassification::ForeignInterest),
            (PassiveSubType::Rental, JurisdictionClassification::ForeignRental),
            (PassiveSubType::Other, JurisdictionClassification::ForeignOtherPassive),
        ];

        for (sub_type, expected) in cases {
            let result = classifier.classify(&stream(IncomeKind::Passive, "US", Some(sub_type)));
            assert_eq!(result, Some(expected), "sub-type {sub_type:?}");
        }
    }

    #[test]
    fn local_passive_is_not_classifiable() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, true);

        let result = classifier.classify(&stream(
            IncomeKind::Passive,
            "PT",
            Some(PassiveSubType::Rental),
        ));

        assert_eq!(result, None);
    }

    #[test]
    fn passive_without_sub_type_is_not_classifiable() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, true);

        assert_eq!(
            classifier.classify(&stream(IncomeKind::Passive, "US", None)),
            None
        );
    }

    #[test]
    fn one_off_streams_are_provisional() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, true);

        let local = classifier.classify(&stream(IncomeKind::OneOff, "PT", None));
        let foreign = classifier.classify(&stream(IncomeKind::OneOff, "US", None));

        assert_eq!(local, Some(JurisdictionClassification::ProvisionalLocalOneOff));
        assert_eq!(foreign, Some(JurisdictionClassification::ProvisionalForeignOneOff));
        assert!(local.unwrap().is_provisional());
    }

    #[test]
    fn inactive_regime_classifies_nothing() {
        let destination = Jurisdiction::new("PT");
        let classifier = IncomeClassifier::new(&destination, false);

        assert_eq!(
            classifier.classify(&stream(IncomeKind::Salary, "PT", None)),
            None
        );
    }
}
