//! Exchange-rate resolution and what-if simulation.
//!
//! The effective rate is derived from three inputs:
//!
//! 1. the market rate fetched upstream (absent when the source failed),
//! 2. an optional manual override,
//! 3. a simulation shift in percent, validated to `[-25, 25]` by the input
//!    layer through [`SimulationPercent`].
//!
//! `baseline = override ? manual : fetched` and
//! `effective = baseline * (1 + simulation / 100)`. When origin and
//! destination currencies are the same both rates are exactly `1`.
//!
//! A missing rate is never an error: every function returns `None` and
//! callers show a neutral "unavailable" state.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use relocation_core::calculations::rate::{apply_simulation, resolve_baseline};
//!
//! let baseline = resolve_baseline(Some(dec!(0.92)), None, false);
//! assert_eq!(baseline, Some(dec!(0.92)));
//!
//! let stressed = apply_simulation(baseline, dec!(-10));
//! assert_eq!(stressed, Some(dec!(0.828)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::RateState;

/// Largest simulation shift, in percent, accepted in either direction.
pub const MAX_SIMULATION_PERCENT: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Errors raised by the rate input layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateInputError {
    /// The simulation shift is outside `[-25, 25]`.
    #[error("simulation percent must be between -25 and 25, got {0}")]
    SimulationOutOfRange(Decimal),
}

/// A simulation shift already checked against [`MAX_SIMULATION_PERCENT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct SimulationPercent(Decimal);

impl SimulationPercent {
    /// # Errors
    ///
    /// Returns [`RateInputError::SimulationOutOfRange`] outside `[-25, 25]`.
    pub fn new(percent: Decimal) -> Result<Self, RateInputError> {
        if percent.abs() > MAX_SIMULATION_PERCENT {
            return Err(RateInputError::SimulationOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for SimulationPercent {
    type Error = RateInputError;

    fn try_from(percent: Decimal) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<SimulationPercent> for Decimal {
    fn from(percent: SimulationPercent) -> Self {
        percent.0
    }
}

fn positive(rate: Option<Decimal>) -> Option<Decimal> {
    rate.filter(|r| *r > Decimal::ZERO)
}

/// Picks the rate used before any simulation.
///
/// With the override enabled a valid (`> 0`) manual rate wins. When the
/// override is enabled but the manual rate is missing or invalid, the fetched
/// rate is used instead. Returns `None` when neither is a positive number.
pub fn resolve_baseline(
    fetched_rate: Option<Decimal>,
    manual_rate: Option<Decimal>,
    override_enabled: bool,
) -> Option<Decimal> {
    if override_enabled {
        if let Some(manual) = positive(manual_rate) {
            return Some(manual);
        }
        warn!(
            manual_rate = ?manual_rate,
            "manual rate override enabled without a valid rate; using fetched rate"
        );
    }
    positive(fetched_rate)
}

/// Shifts `baseline_rate` by `simulation_percent` percent.
///
/// Range checking of the percentage belongs to the input layer
/// ([`SimulationPercent`]); this function applies whatever it is given.
pub fn apply_simulation(
    baseline_rate: Option<Decimal>,
    simulation_percent: Decimal,
) -> Option<Decimal> {
    baseline_rate.map(|rate| rate * (Decimal::ONE + simulation_percent / Decimal::ONE_HUNDRED))
}

/// Converts a destination-currency amount into the origin currency for display.
pub fn convert_for_display(
    amount: Decimal,
    rate: Option<Decimal>,
) -> Option<Decimal> {
    positive(rate).map(|r| amount / r)
}

impl RateState {
    pub fn is_same_currency(&self) -> bool {
        self.origin_currency == self.destination_currency
    }

    /// Rate with no simulation applied.
    pub fn baseline_rate(&self) -> Option<Decimal> {
        if self.is_same_currency() {
            return Some(Decimal::ONE);
        }
        resolve_baseline(self.fetched_rate, self.manual_rate, self.override_enabled)
    }

    /// Rate actually used for conversions.
    pub fn effective_rate(&self) -> Option<Decimal> {
        if self.is_same_currency() {
            return Some(Decimal::ONE);
        }
        let effective = apply_simulation(self.baseline_rate(), self.simulation_percent);
        debug!(
            origin = %self.origin_currency,
            destination = %self.destination_currency,
            effective = ?effective,
            "resolved effective rate"
        );
        effective
    }
}
