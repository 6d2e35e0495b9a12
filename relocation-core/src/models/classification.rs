use serde::{Deserialize, Serialize};

/// Tax treatment bucket an income stream falls into under a preferential
/// regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionClassification {
    /// Salary earned in the destination jurisdiction.
    LocalEmployment,
    ForeignEmployment,
    ForeignPension,
    ForeignDividend,
    ForeignInterest,
    ForeignRental,
    ForeignOtherPassive,
    /// One-off inflow sourced locally, taxed like local employment for now.
    ProvisionalLocalOneOff,
    /// One-off inflow sourced abroad, taxed at the default foreign rate for now.
    ProvisionalForeignOneOff,
}

impl JurisdictionClassification {
    /// One-off treatments are placeholders; callers should flag results that
    /// depend on them.
    pub fn is_provisional(&self) -> bool {
        matches!(
            self,
            Self::ProvisionalLocalOneOff | Self::ProvisionalForeignOneOff
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LocalEmployment => "preferential local employment",
            Self::ForeignEmployment => "foreign employment",
            Self::ForeignPension => "foreign pension",
            Self::ForeignDividend => "foreign dividends",
            Self::ForeignInterest => "foreign interest",
            Self::ForeignRental => "foreign rental",
            Self::ForeignOtherPassive => "foreign other passive",
            Self::ProvisionalLocalOneOff => "one-off local (provisional)",
            Self::ProvisionalForeignOneOff => "one-off foreign (provisional)",
        }
    }
}
