use rust_decimal::Decimal;

use super::MonthlyCost;
use super::seasonal::seasonal_average;
use crate::UtilityExpenses;
use crate::calculations::common::input_amount;

impl MonthlyCost for UtilityExpenses {
    fn monthly_cost(&self) -> Decimal {
        seasonal_average(&self.electricity)
            + seasonal_average(&self.heating)
            + input_amount(self.water)
            + input_amount(self.internet)
            + input_amount(self.mobile)
    }
}
