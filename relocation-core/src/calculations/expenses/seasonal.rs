//! Seasonal averaging for utility bills.

use rust_decimal::Decimal;

use crate::SeasonalCost;
use crate::calculations::common::input_amount;

/// Monthly figure for a utility entered flat or per season.
///
/// In seasonal mode the result is the arithmetic mean of the four seasonal
/// monthly figures, each floored at zero; otherwise the flat figure.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use relocation_core::SeasonalCost;
/// use relocation_core::calculations::expenses::seasonal::seasonal_average;
///
/// let heating = SeasonalCost::seasons(dec!(200), dec!(80), dec!(0), dec!(120));
/// assert_eq!(seasonal_average(&heating), dec!(100));
/// ```
pub fn seasonal_average(cost: &SeasonalCost) -> Decimal {
    if !cost.seasonal {
        return input_amount(cost.monthly);
    }

    let seasons = [cost.winter, cost.spring, cost.summer, cost.autumn];
    let total: Decimal = seasons.into_iter().map(input_amount).sum();
    total / Decimal::from(seasons.len())
}
