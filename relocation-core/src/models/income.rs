use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Frequency, Jurisdiction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    Salary,
    Passive,
    OneOff,
}

impl IncomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Passive => "passive",
            Self::OneOff => "one_off",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salary" => Some(Self::Salary),
            "passive" => Some(Self::Passive),
            "one_off" | "oneoff" | "one-off" => Some(Self::OneOff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveSubType {
    Rental,
    Dividend,
    Interest,
    Pension,
    Other,
}

impl PassiveSubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rental => "rental",
            Self::Dividend => "dividend",
            Self::Interest => "interest",
            Self::Pension => "pension",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rental" => Some(Self::Rental),
            "dividend" => Some(Self::Dividend),
            "interest" => Some(Self::Interest),
            "pension" => Some(Self::Pension),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Income as the household declares it: any currency, any frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDeclaration {
    pub id: String,
    pub kind: IncomeKind,
    pub source_jurisdiction: Jurisdiction,
    #[serde(default)]
    pub sub_type: Option<PassiveSubType>,
    pub amount: Decimal,
    pub currency: CurrencyCode,
    /// Ignored for [`IncomeKind::OneOff`], which is taken as a single yearly inflow.
    #[serde(default)]
    pub frequency: Frequency,
}

/// An income declaration after normalization.
///
/// `amount` is annualized and expressed in the destination currency. The
/// original figures are kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStream {
    pub id: String,
    pub kind: IncomeKind,
    pub source_jurisdiction: Jurisdiction,
    pub sub_type: Option<PassiveSubType>,
    pub amount: Decimal,
    pub original_amount: Decimal,
    pub original_currency: CurrencyCode,
}
