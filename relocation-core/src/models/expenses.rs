//! Raw expense inputs, one struct per category.
//!
//! Every numeric field is optional: a missing value means "not filled in"
//! and counts as zero. The monthly cost of each category is computed in
//! [`crate::calculations::expenses`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Frequency;

/// Largest household the per-member lists are sized for.
pub const MAX_HOUSEHOLD_MEMBERS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingTenure {
    #[default]
    Rent,
    Buy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingExpenses {
    pub tenure: HousingTenure,

    // Buy
    pub property_price: Option<Decimal>,
    pub down_payment_percent: Option<Decimal>,
    pub loan_term_years: Option<Decimal>,
    pub annual_interest_rate_percent: Option<Decimal>,

    // Rent
    pub monthly_rent: Option<Decimal>,

    // Spread over twelve months
    pub annual_maintenance: Option<Decimal>,
    pub annual_insurance: Option<Decimal>,
    pub annual_property_tax: Option<Decimal>,
}

/// A utility bill entered either as one flat monthly figure or as four
/// seasonal monthly figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalCost {
    pub seasonal: bool,
    pub monthly: Option<Decimal>,
    pub winter: Option<Decimal>,
    pub spring: Option<Decimal>,
    pub summer: Option<Decimal>,
    pub autumn: Option<Decimal>,
}

impl SeasonalCost {
    pub fn flat(monthly: Decimal) -> Self {
        Self {
            monthly: Some(monthly),
            ..Self::default()
        }
    }

    pub fn seasons(
        winter: Decimal,
        spring: Decimal,
        summer: Decimal,
        autumn: Decimal,
    ) -> Self {
        Self {
            seasonal: true,
            monthly: None,
            winter: Some(winter),
            spring: Some(spring),
            summer: Some(summer),
            autumn: Some(autumn),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityExpenses {
    pub electricity: SeasonalCost,
    pub heating: SeasonalCost,
    pub water: Option<Decimal>,
    pub internet: Option<Decimal>,
    pub mobile: Option<Decimal>,
}

/// How an owned vehicle is paid for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VehicleFinancing {
    /// Bought outright; no recurring payment.
    #[default]
    Outright,
    Lease {
        #[serde(default)]
        monthly_payment: Option<Decimal>,
    },
    Loan {
        #[serde(default)]
        price: Option<Decimal>,
        #[serde(default)]
        down_payment_percent: Option<Decimal>,
        #[serde(default)]
        term_years: Option<Decimal>,
        #[serde(default)]
        annual_interest_rate_percent: Option<Decimal>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportExpenses {
    pub owns_vehicle: bool,
    pub financing: VehicleFinancing,
    pub monthly_fuel_or_charging: Option<Decimal>,
    pub monthly_insurance: Option<Decimal>,
    pub monthly_maintenance: Option<Decimal>,
    pub monthly_public_transport_pass: Option<Decimal>,
    pub monthly_ride_share: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageType {
    /// Covered by the destination's public system.
    #[default]
    Public,
    /// Paid for by an employer.
    Employer,
    Private,
    International,
}

impl CoverageType {
    pub fn requires_premium(&self) -> bool {
        matches!(self, Self::Private | Self::International)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthcareMember {
    pub coverage: CoverageType,
    pub monthly_premium: Option<Decimal>,
    pub monthly_out_of_pocket: Option<Decimal>,
    /// Known recurring costs such as prescriptions.
    pub monthly_recurring: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthcareExpenses {
    pub members: Vec<HealthcareMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schooling {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildEducation {
    pub schooling: Schooling,
    pub annual_tuition: Option<Decimal>,
    /// Uniforms, transport, trips and other extras per year.
    pub annual_extras: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationExpenses {
    pub children: Vec<ChildEducation>,
}

/// An amount paid at a given frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringAmount {
    pub amount: Option<Decimal>,
    pub frequency: Frequency,
}

impl RecurringAmount {
    pub fn new(
        amount: Decimal,
        frequency: Frequency,
    ) -> Self {
        Self {
            amount: Some(amount),
            frequency,
        }
    }
}

/// Cleaning, gardening, childcare and similar services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeService {
    pub name: String,
    pub amount: Option<Decimal>,
    pub frequency: Frequency,
}

/// Buffer on top of the other lifestyle costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Contingency {
    Fixed {
        #[serde(default)]
        monthly_amount: Option<Decimal>,
    },
    /// Percentage of the other lifestyle sub-totals.
    Percent {
        #[serde(default)]
        percent: Option<Decimal>,
    },
}

impl Default for Contingency {
    fn default() -> Self {
        Self::Fixed {
            monthly_amount: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifestyleExpenses {
    pub general_shopping: RecurringAmount,
    /// Total of one-off purchases expected in the first year.
    pub one_off_purchases: Option<Decimal>,
    pub travel: RecurringAmount,
    pub home_services: Vec<HomeService>,
    pub contingency: Contingency,
}

/// All six expense categories of one budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseInputs {
    pub housing: HousingExpenses,
    pub utilities: UtilityExpenses,
    pub transport: TransportExpenses,
    pub healthcare: HealthcareExpenses,
    pub education: EducationExpenses,
    pub lifestyle: LifestyleExpenses,
}

impl ExpenseInputs {
    /// Resizes the per-member and per-child lists to match the household.
    ///
    /// Counts above [`MAX_HOUSEHOLD_MEMBERS`] are capped.
    pub fn sized_for(
        mut self,
        household: &HouseholdComposition,
    ) -> Self {
        if household.is_oversized() {
            warn!(
                members = household.member_count(),
                max = MAX_HOUSEHOLD_MEMBERS,
                "household larger than supported; lists capped"
            );
        }
        let cap = MAX_HOUSEHOLD_MEMBERS as usize;
        let members = usize::try_from(household.member_count()).unwrap_or(cap).min(cap);
        let children = (household.children as usize).min(cap);

        self.healthcare
            .members
            .resize_with(members, HealthcareMember::default);
        self.education
            .children
            .resize_with(children, ChildEducation::default);
        self
    }
}

/// Head counts per age bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdComposition {
    pub adults: u32,
    pub children: u32,
    pub seniors: u32,
}

impl HouseholdComposition {
    pub fn member_count(&self) -> u64 {
        u64::from(self.adults) + u64::from(self.children) + u64::from(self.seniors)
    }

    pub fn is_oversized(&self) -> bool {
        self.member_count() > u64::from(MAX_HOUSEHOLD_MEMBERS)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn sized_for_pads_members_and_children() {
        let household = HouseholdComposition {
            adults: 2,
            children: 1,
            seniors: 1,
        };

        let inputs = ExpenseInputs::default().sized_for(&household);

        assert_eq!(inputs.healthcare.members.len(), 4);
        assert_eq!(inputs.education.children.len(), 1);
    }

    #[test]
    fn sized_for_truncates_extra_entries_and_keeps_the_rest() {
        let mut inputs = ExpenseInputs::default();
        inputs.education.children = vec![
            ChildEducation {
                schooling: Schooling::Private,
                annual_tuition: Some(dec!(9000)),
                annual_extras: None,
            },
            ChildEducation::default(),
        ];
        let household = HouseholdComposition {
            adults: 1,
            children: 1,
            seniors: 0,
        };

        let inputs = inputs.sized_for(&household);

        assert_eq!(inputs.education.children.len(), 1);
        assert_eq!(inputs.education.children[0].annual_tuition, Some(dec!(9000)));
    }

    #[test]
    fn member_count_does_not_overflow() {
        let household = HouseholdComposition {
            adults: u32::MAX,
            children: 1,
            seniors: u32::MAX,
        };

        assert_eq!(household.member_count(), 2 * u64::from(u32::MAX) + 1);
        assert!(household.is_oversized());
    }

    #[test]
    fn sized_for_caps_oversized_household() {
        let household = HouseholdComposition {
            adults: u32::MAX,
            children: u32::MAX,
            seniors: 0,
        };

        let inputs = ExpenseInputs::default().sized_for(&household);

        assert_eq!(inputs.healthcare.members.len(), MAX_HOUSEHOLD_MEMBERS as usize);
        assert_eq!(inputs.education.children.len(), MAX_HOUSEHOLD_MEMBERS as usize);
    }

    #[test]
    fn empty_json_object_yields_default_inputs() {
        let inputs: ExpenseInputs = serde_json::from_str("{}").unwrap();

        assert_eq!(inputs, ExpenseInputs::default());
    }

    #[test]
    fn tagged_enums_deserialize() {
        let json = r#"{
            "owns_vehicle": true,
            "financing": { "type": "lease", "monthly_payment": "320" }
        }"#;

        let transport: TransportExpenses = serde_json::from_str(json).unwrap();

        assert_eq!(
            transport.financing,
            VehicleFinancing::Lease {
                monthly_payment: Some(dec!(320))
            }
        );
    }

    #[test]
    fn only_private_and_international_coverage_need_a_premium() {
        assert!(!CoverageType::Public.requires_premium());
        assert!(!CoverageType::Employer.requires_premium());
        assert!(CoverageType::Private.requires_premium());
        assert!(CoverageType::International.requires_premium());
    }
}
