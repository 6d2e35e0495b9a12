use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyCode;

/// Raw exchange-rate inputs for converting the origin currency into the
/// destination currency.
///
/// Rates are expressed as destination units per one origin unit. The baseline
/// and effective rates are derived on every read (see
/// [`crate::calculations::rate`]) and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateState {
    pub origin_currency: CurrencyCode,
    pub destination_currency: CurrencyCode,

    /// Market rate from the upstream source; `None` when it could not be fetched.
    pub fetched_rate: Option<Decimal>,

    pub manual_rate: Option<Decimal>,
    pub override_enabled: bool,

    /// What-if shift applied to the baseline, in percent.
    pub simulation_percent: Decimal,
}
