//! Budget calculations for a household relocation.
//!
//! Every function here is pure and total: bad numeric input degrades to zero
//! and missing data is reported as `None` rather than as an error.

pub mod common;
pub mod expenses;
pub mod income;
pub mod input;
pub mod planner;
pub mod rate;
pub mod summary;
pub mod tax;

pub use expenses::{ExpenseBreakdown, MonthlyCost, total_monthly_expenses};
pub use income::{CurrencyContext, IncomeClassifier, NormalizedIncome, normalize_declarations};
pub use planner::{
    Evaluation, compare_rate_scenarios, evaluate, evaluate_current, resolve_effective_rate,
};
pub use rate::{RateInputError, SimulationPercent, convert_for_display};
pub use summary::{emergency_runway_months, required_gross_income, summarize};
pub use tax::{TaxCalculator, aggregate as classify_and_tax};
