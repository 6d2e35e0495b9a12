use rust_decimal::Decimal;

use super::MonthlyCost;
use crate::calculations::common::input_amount;
use crate::{HealthcareExpenses, HealthcareMember};

impl HealthcareMember {
    pub fn monthly_cost(&self) -> Decimal {
        let premium = if self.coverage.requires_premium() {
            input_amount(self.monthly_premium)
        } else {
            Decimal::ZERO
        };
        premium + input_amount(self.monthly_out_of_pocket) + input_amount(self.monthly_recurring)
    }
}

impl MonthlyCost for HealthcareExpenses {
    fn monthly_cost(&self) -> Decimal {
        self.members.iter().map(HealthcareMember::monthly_cost).sum()
    }
}
