//! Run configuration and its validation gate.

use crate::{AgentId, CoreError, CoreResult};

/// Everything that stays constant for one simulation run.
///
/// Sizes and step counts are unsigned, so "negative" values cannot be
/// represented; a JSON config carrying one fails at deserialization.  The
/// remaining range checks live in [`validate`][Self::validate], which the
/// engine builder calls before seeding the RNG.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Number of households.  Zero is allowed and yields a degenerate run
    /// whose rates are all zero.
    pub population_size: usize,

    /// Shared cars available per step.
    pub fleet_capacity: usize,

    /// Price of shared access, in the same normalized units as the profile's
    /// price sensitivity.
    pub access_price: f64,

    /// Probability that a booking fails even though a car is free.
    pub booking_fail_prob: f64,

    /// Perceived inconvenience of booking, independent of reliability.
    pub booking_friction: f64,

    /// Probability that a household sells its car in the step it adopts.
    pub drop_ownership_prob: f64,

    /// Steps executed by `Sim::run_to_end`.
    pub step_count: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed:                42,
            population_size:     500,
            fleet_capacity:      25,
            access_price:        0.6,
            booking_fail_prob:   0.10,
            booking_friction:    0.30,
            drop_ownership_prob: 0.50,
            step_count:          100,
        }
    }
}

impl ModelConfig {
    /// Check every range constraint.
    ///
    /// Probabilities must be finite and in `[0, 1]`; price and friction must
    /// be finite and non-negative.  Every household must be addressable by
    /// an [`AgentId`].
    pub fn validate(&self) -> CoreResult<()> {
        if AgentId::try_from(self.population_size).is_err() {
            return Err(CoreError::Config(format!(
                "population_size must be at most {}, got {}",
                u32::MAX,
                self.population_size
            )));
        }
        check_probability("booking_fail_prob", self.booking_fail_prob)?;
        check_probability("drop_ownership_prob", self.drop_ownership_prob)?;
        check_non_negative("access_price", self.access_price)?;
        check_non_negative("booking_friction", self.booking_friction)?;
        Ok(())
    }

    /// Fleet capacity per household, the perceived-availability proxy.
    ///
    /// The denominator is floored at 1 so an empty population is defined.
    #[inline]
    pub fn supply_factor(&self) -> f64 {
        self.fleet_capacity as f64 / self.population_size.max(1) as f64
    }
}

fn check_probability(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be in [0, 1], got {value}")))
    }
}

fn check_non_negative(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be a non-negative number, got {value}")))
    }
}
