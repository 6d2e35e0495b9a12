use rust_decimal::Decimal;

use super::MonthlyCost;
use super::loan::{amortized_monthly_payment, financed_principal};
use crate::calculations::common::input_amount;
use crate::{HousingExpenses, HousingTenure};

impl HousingExpenses {
    /// Mortgage payment when buying, rent otherwise.
    pub fn monthly_housing_payment(&self) -> Decimal {
        match self.tenure {
            HousingTenure::Buy => amortized_monthly_payment(
                financed_principal(self.property_price, self.down_payment_percent),
                input_amount(self.annual_interest_rate_percent),
                input_amount(self.loan_term_years),
            ),
            HousingTenure::Rent => input_amount(self.monthly_rent),
        }
    }

    /// Maintenance, insurance and property tax spread over twelve months.
    pub fn monthly_running_costs(&self) -> Decimal {
        let annual = input_amount(self.annual_maintenance)
            + input_amount(self.annual_insurance)
            + input_amount(self.annual_property_tax);
        annual / Decimal::from(12)
    }
}

impl MonthlyCost for HousingExpenses {
    fn monthly_cost(&self) -> Decimal {
        self.monthly_housing_payment() + self.monthly_running_costs()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;

    #[test]
    fn renting_costs_rent_plus_running_costs() {
        let housing = HousingExpenses {
            tenure: HousingTenure::Rent,
            monthly_rent: Some(dec!(1400)),
            annual_insurance: Some(dec!(240)),
            ..HousingExpenses::default()
        };

        assert_eq!(housing.monthly_cost(), dec!(1420));
    }

    #[test]
    fn buying_costs_mortgage_plus_running_costs() {
        let housing = HousingExpenses {
            tenure: HousingTenure::Buy,
            property_price: Some(dec!(300000)),
            down_payment_percent: Some(dec!(20)),
            loan_term_years: Some(dec!(30)),
            annual_interest_rate_percent: Some(dec!(3.5)),
            monthly_rent: Some(dec!(999)),
            annual_maintenance: Some(dec!(1200)),
            annual_insurance: Some(dec!(360)),
            annual_property_tax: Some(dec!(840)),
            ..HousingExpenses::default()
        };

        assert_eq!(round_half_up(housing.monthly_housing_payment()), dec!(1077.71));
        assert_eq!(housing.monthly_running_costs(), dec!(200));
        assert_eq!(round_half_up(housing.monthly_cost()), dec!(1277.71));
    }

    #[test]
    fn long_high_rate_mortgage_is_finite_and_non_zero() {
        for term in [dec!(60), dec!(69), dec!(70), dec!(100)] {
            let housing = HousingExpenses {
                tenure: HousingTenure::Buy,
                property_price: Some(dec!(300000)),
                down_payment_percent: Some(dec!(20)),
                loan_term_years: Some(term),
                annual_interest_rate_percent: Some(dec!(100)),
                ..HousingExpenses::default()
            };

            assert_eq!(round_half_up(housing.monthly_cost()), dec!(20000.00));
        }
    }

    #[test]
    fn buying_with_empty_fields_costs_nothing() {
        let housing = HousingExpenses {
            tenure: HousingTenure::Buy,
            ..HousingExpenses::default()
        };

        assert_eq!(housing.monthly_cost(), dec!(0));
    }
}
