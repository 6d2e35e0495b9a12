use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a declared amount recurs.
///
/// Income is annualized with [`Frequency::annualize`]; expenses are brought
/// to a monthly figure with [`Frequency::to_monthly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl Frequency {
    /// Number of occurrences per year.
    pub fn annual_factor(self) -> Decimal {
        match self {
            Self::Weekly => Decimal::from(52),
            Self::Biweekly => Decimal::from(26),
            Self::Monthly => Decimal::from(12),
            Self::Quarterly => Decimal::from(4),
            Self::Annually => Decimal::ONE,
        }
    }

    pub fn annualize(
        self,
        amount: Decimal,
    ) -> Decimal {
        amount * self.annual_factor()
    }

    pub fn to_monthly(
        self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Monthly => amount,
            Self::Annually => amount / Decimal::from(12),
            other => other.annualize(amount) / Decimal::from(12),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annually => "annually",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "annually" | "annual" | "yearly" => Some(Self::Annually),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn monthly_amount_is_unchanged_when_converted_to_monthly() {
        assert_eq!(Frequency::Monthly.to_monthly(dec!(123.45)), dec!(123.45));
    }

    #[test]
    fn annual_amount_is_spread_over_twelve_months() {
        assert_eq!(Frequency::Annually.to_monthly(dec!(1200)), dec!(100));
    }

    #[test]
    fn weekly_amount_uses_fifty_two_weeks() {
        assert_eq!(Frequency::Weekly.to_monthly(dec!(30)), dec!(130));
    }

    #[test]
    fn quarterly_amount_is_annualized_by_four() {
        assert_eq!(Frequency::Quarterly.annualize(dec!(2500)), dec!(10000));
    }

    #[test]
    fn parse_accepts_aliases_and_case() {
        assert_eq!(Frequency::parse("Annual"), Some(Frequency::Annually));
        assert_eq!(Frequency::parse(" BIWEEKLY "), Some(Frequency::Biweekly));
        assert_eq!(Frequency::parse("daily"), None);
    }
}
