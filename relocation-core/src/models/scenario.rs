use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    CurrencyCode, ExpenseInputs, HouseholdComposition, IncomeDeclaration, Jurisdiction, RateState,
};

/// Exchange-rate inputs the user controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateInputs {
    pub fetched_rate: Option<Decimal>,
    pub manual_rate: Option<Decimal>,
    pub override_enabled: bool,
    pub simulation_percent: Decimal,
}

/// Every raw input of one relocation budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    pub origin_currency: CurrencyCode,
    pub destination: Jurisdiction,
    pub destination_currency: CurrencyCode,
    #[serde(default)]
    pub preferential_regime_active: bool,
    /// Sizes the healthcare and education lists when present.
    #[serde(default)]
    pub household: Option<HouseholdComposition>,
    #[serde(default)]
    pub incomes: Vec<IncomeDeclaration>,
    #[serde(default)]
    pub expenses: ExpenseInputs,
    #[serde(default)]
    pub emergency_reserve: Option<Decimal>,
    #[serde(default)]
    pub rate: RateInputs,
}

impl ScenarioInputs {
    /// Expense inputs with their per-member lists sized to the household.
    pub fn sized_expenses(&self) -> ExpenseInputs {
        match &self.household {
            Some(household) => self.expenses.clone().sized_for(household),
            None => self.expenses.clone(),
        }
    }

    pub fn rate_state(&self) -> RateState {
        RateState {
            origin_currency: self.origin_currency.clone(),
            destination_currency: self.destination_currency.clone(),
            fetched_rate: self.rate.fetched_rate,
            manual_rate: self.rate.manual_rate,
            override_enabled: self.rate.override_enabled,
            simulation_percent: self.rate.simulation_percent,
        }
    }
}

/// A stored scenario, keyed by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
    pub inputs: ScenarioInputs,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new scenarios (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScenario {
    pub name: String,
    pub inputs: ScenarioInputs,
}
