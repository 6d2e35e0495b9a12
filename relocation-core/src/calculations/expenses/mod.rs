//! Expense aggregation.
//!
//! Each category maps its raw inputs to a single monthly cash-flow figure
//! through [`MonthlyCost`]. Every implementation is total: missing fields
//! count as zero, negative fields are coerced to zero, and the result is
//! never negative.

pub mod education;
pub mod healthcare;
pub mod housing;
pub mod lifestyle;
pub mod loan;
pub mod seasonal;
pub mod transport;
pub mod utilities;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ExpenseInputs;
use crate::calculations::common::floor_at_zero;

/// A category of expenses that reduces to one monthly figure.
pub trait MonthlyCost {
    fn monthly_cost(&self) -> Decimal;
}

/// Monthly cost per category plus the overall total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub housing: Decimal,
    pub utilities: Decimal,
    pub transport: Decimal,
    pub healthcare: Decimal,
    pub education: Decimal,
    pub lifestyle: Decimal,
    pub total: Decimal,
}

impl ExpenseBreakdown {
    pub fn from_inputs(inputs: &ExpenseInputs) -> Self {
        let housing = inputs.housing.monthly_cost();
        let utilities = inputs.utilities.monthly_cost();
        let transport = inputs.transport.monthly_cost();
        let healthcare = inputs.healthcare.monthly_cost();
        let education = inputs.education.monthly_cost();
        let lifestyle = inputs.lifestyle.monthly_cost();
        let total =
            floor_at_zero(housing + utilities + transport + healthcare + education + lifestyle);

        Self {
            housing,
            utilities,
            transport,
            healthcare,
            education,
            lifestyle,
            total,
        }
    }
}

/// Sum of all six category figures, floored at zero.
pub fn total_monthly_expenses(inputs: &ExpenseInputs) -> Decimal {
    ExpenseBreakdown::from_inputs(inputs).total
}
