use rust_decimal::Decimal;

use super::MonthlyCost;
use crate::calculations::common::input_amount;
use crate::{ChildEducation, EducationExpenses, Schooling};

impl ChildEducation {
    /// Tuition and extras spread over twelve months; public schooling is free.
    pub fn monthly_cost(&self) -> Decimal {
        match self.schooling {
            Schooling::Public => Decimal::ZERO,
            Schooling::Private => {
                (input_amount(self.annual_tuition) + input_amount(self.annual_extras))
                    / Decimal::from(12)
            }
        }
    }
}

impl MonthlyCost for EducationExpenses {
    fn monthly_cost(&self) -> Decimal {
        self.children.iter().map(ChildEducation::monthly_cost).sum()
    }
}
