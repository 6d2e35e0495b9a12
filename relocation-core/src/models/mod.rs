mod classification;
mod expenses;
mod frequency;
mod income;
mod jurisdiction;
mod rate_state;
mod regime;
mod scenario;
mod summary;
mod tax_outcome;

pub use classification::JurisdictionClassification;
pub use expenses::{
    ChildEducation, Contingency, CoverageType, EducationExpenses, ExpenseInputs,
    HealthcareExpenses, HealthcareMember, HomeService, HouseholdComposition, HousingExpenses,
    HousingTenure, LifestyleExpenses, MAX_HOUSEHOLD_MEMBERS, RecurringAmount, Schooling,
    SeasonalCost, TransportExpenses, UtilityExpenses, VehicleFinancing,
};
pub use frequency::Frequency;
pub use income::{IncomeDeclaration, IncomeKind, IncomeStream, PassiveSubType};
pub use jurisdiction::{CurrencyCode, Jurisdiction};
pub use rate_state::RateState;
pub use regime::{PreferentialRegime, RegimeConfigError, RegimeTable, RequiredGrossFormula};
pub use scenario::{NewScenario, RateInputs, Scenario, ScenarioInputs};
pub use summary::{BudgetSummary, ImpactMetric, ImpactRow, OriginCurrencyView, RateImpact, Runway};
pub use tax_outcome::{AggregateTaxOutcome, TaxResult};
