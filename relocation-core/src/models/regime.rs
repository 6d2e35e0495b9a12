//! Table-driven preferential tax regimes, keyed by destination jurisdiction.
//!
//! A [`RegimeTable`] is configuration: it is usually loaded from a file at
//! startup and validated once with [`RegimeTable::validate`] before any
//! calculation uses it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use relocation_core::{Jurisdiction, PreferentialRegime, RegimeTable, RequiredGrossFormula};
//!
//! let table = RegimeTable::new(vec![PreferentialRegime {
//!     jurisdiction: Jurisdiction::new("PT"),
//!     name: "Flat-rate resident regime".to_string(),
//!     local_employment_tax_rate: dec!(0.20),
//!     social_contribution_rate: dec!(0.11),
//!     foreign_pension_rate: dec!(0.10),
//!     default_foreign_rate: dec!(0.00),
//!     required_gross_formula: Some(RequiredGrossFormula::FlatLocalEmployment),
//! }]);
//!
//! assert_eq!(table.validate(), Ok(()));
//! assert!(table.regime_for(&Jurisdiction::new("pt")).is_some());
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Jurisdiction;

/// Errors found while validating regime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegimeConfigError {
    /// A regime entry has no jurisdiction code.
    #[error("regime '{0}' has an empty jurisdiction code")]
    EmptyJurisdiction(String),

    /// Two entries configure the same destination.
    #[error("jurisdiction {0} is configured more than once")]
    DuplicateJurisdiction(Jurisdiction),

    /// A rate is outside `[0, 1]`.
    #[error("{field} for {jurisdiction} must be between 0 and 1, got {value}")]
    InvalidRate {
        jurisdiction: Jurisdiction,
        field: &'static str,
        value: Decimal,
    },

    /// Local employment tax plus social contribution would exceed the gross.
    #[error("local tax and social contribution for {jurisdiction} add up to {total}, more than 1")]
    LocalBurdenExceedsGross {
        jurisdiction: Jurisdiction,
        total: Decimal,
    },
}

/// Known closed-form inversions from net need to gross income.
///
/// Only regimes with an entry here can answer "what gross income covers these
/// expenses"; every other combination reports "not available".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredGrossFormula {
    /// Flat tax plus flat contribution on local employment income, so the
    /// burden is simply their sum.
    FlatLocalEmployment,
}

/// Flat rates of one destination's preferential regime.
///
/// All rates are fractions (`0.20` for 20%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferentialRegime {
    pub jurisdiction: Jurisdiction,
    pub name: String,

    /// Flat income tax on locally sourced employment income.
    pub local_employment_tax_rate: Decimal,

    /// Flat social-security contribution on locally sourced employment income.
    pub social_contribution_rate: Decimal,

    /// Flat tax on pensions sourced abroad.
    pub foreign_pension_rate: Decimal,

    /// Rate for every other foreign classification. Zero models a treaty
    /// exemption.
    pub default_foreign_rate: Decimal,

    #[serde(default)]
    pub required_gross_formula: Option<RequiredGrossFormula>,
}

impl PreferentialRegime {
    /// Validates the configured rates.
    ///
    /// # Errors
    ///
    /// Returns [`RegimeConfigError`] if:
    /// - the jurisdiction code is empty
    /// - any rate is outside `[0, 1]`
    /// - local tax plus contribution exceeds 1
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        if self.jurisdiction.is_empty() {
            return Err(RegimeConfigError::EmptyJurisdiction(self.name.clone()));
        }

        let rates = [
            ("local_employment_tax_rate", self.local_employment_tax_rate),
            ("social_contribution_rate", self.social_contribution_rate),
            ("foreign_pension_rate", self.foreign_pension_rate),
            ("default_foreign_rate", self.default_foreign_rate),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RegimeConfigError::InvalidRate {
                    jurisdiction: self.jurisdiction.clone(),
                    field,
                    value,
                });
            }
        }

        let total = self.local_employment_tax_rate + self.social_contribution_rate;
        if total > Decimal::ONE {
            return Err(RegimeConfigError::LocalBurdenExceedsGross {
                jurisdiction: self.jurisdiction.clone(),
                total,
            });
        }

        Ok(())
    }
}

/// Every configured preferential regime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeTable {
    #[serde(default)]
    regimes: Vec<PreferentialRegime>,
}

impl RegimeTable {
    pub fn new(regimes: Vec<PreferentialRegime>) -> Self {
        Self { regimes }
    }

    pub fn regimes(&self) -> &[PreferentialRegime] {
        &self.regimes
    }

    pub fn regime_for(
        &self,
        destination: &Jurisdiction,
    ) -> Option<&PreferentialRegime> {
        self.regimes
            .iter()
            .find(|r| &r.jurisdiction == destination)
    }

    /// Validates every entry and rejects duplicate destinations.
    pub fn validate(&self) -> Result<(), RegimeConfigError> {
        let mut seen = HashSet::new();
        for regime in &self.regimes {
            regime.validate()?;
            if !seen.insert(&regime.jurisdiction) {
                return Err(RegimeConfigError::DuplicateJurisdiction(
                    regime.jurisdiction.clone(),
                ));
            }
        }
        Ok(())
    }
}
