use rust_decimal::Decimal;

use super::MonthlyCost;
use crate::calculations::common::{input_amount, percent_of};
use crate::{Contingency, HomeService, LifestyleExpenses, RecurringAmount};

impl RecurringAmount {
    pub fn monthly(&self) -> Decimal {
        self.frequency.to_monthly(input_amount(self.amount))
    }
}

impl HomeService {
    pub fn monthly(&self) -> Decimal {
        self.frequency.to_monthly(input_amount(self.amount))
    }
}

impl LifestyleExpenses {
    /// Everything except the contingency buffer.
    pub fn monthly_subtotal(&self) -> Decimal {
        let services: Decimal = self.home_services.iter().map(HomeService::monthly).sum();
        self.general_shopping.monthly()
            + input_amount(self.one_off_purchases) / Decimal::from(12)
            + self.travel.monthly()
            + services
    }

    pub fn monthly_contingency(&self) -> Decimal {
        match &self.contingency {
            Contingency::Fixed { monthly_amount } => input_amount(*monthly_amount),
            Contingency::Percent { percent } => {
                percent_of(self.monthly_subtotal(), input_amount(*percent))
            }
        }
    }
}

impl MonthlyCost for LifestyleExpenses {
    fn monthly_cost(&self) -> Decimal {
        self.monthly_subtotal() + self.monthly_contingency()
    }
}
