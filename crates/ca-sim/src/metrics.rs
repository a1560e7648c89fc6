//! Population-level time series.
//!
//! [`snapshot`] is a pure function of the household slice and the config;
//! [`MetricsCollector`] only stores its results in step order.

use ca_agent::HouseholdAgent;
use ca_core::{ModelConfig, Step};

/// One row of the metrics time series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsRecord {
    /// 0 for the initial snapshot, then 1, 2, …
    pub step:                u64,
    /// Share of households that have adopted shared access.
    pub adoption_rate:       f64,
    /// Share of households still owning a private car.
    pub ownership_rate:      f64,
    /// Cumulative failed / (failed + successful) bookings across the run.
    pub failed_booking_rate: f64,

    // Echoed configuration, for downstream tabulation.
    pub fleet_capacity:      usize,
    pub access_price:        f64,
    pub booking_fail_prob:   f64,
    pub booking_friction:    f64,
}

/// Aggregate the current population state into one record.
///
/// All denominators are floored at 1, so an empty population or a run with
/// no bookings yet yields 0.0 rather than NaN.
pub fn snapshot(step: Step, agents: &[HouseholdAgent], config: &ModelConfig) -> MetricsRecord {
    let n = agents.len().max(1) as f64;

    let mut adopted = 0usize;
    let mut owners = 0usize;
    let mut failed = 0u64;
    let mut succeeded = 0u64;
    for agent in agents {
        adopted += usize::from(agent.adopted());
        owners += usize::from(agent.owns_vehicle());
        failed += agent.failed_bookings();
        succeeded += agent.successful_bookings();
    }

    MetricsRecord {
        step:                step.0,
        adoption_rate:       adopted as f64 / n,
        ownership_rate:      owners as f64 / n,
        failed_booking_rate: failed as f64 / (failed + succeeded).max(1) as f64,
        fleet_capacity:      config.fleet_capacity,
        access_price:        config.access_price,
        booking_fail_prob:   config.booking_fail_prob,
        booking_friction:    config.booking_friction,
    }
}

/// Ordered store of metrics records, one per step.
#[derive(Clone, Debug, Default)]
pub struct MetricsCollector {
    records: Vec<MetricsRecord>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a snapshot and append it.  Returns a reference to the new record.
    pub fn collect(
        &mut self,
        step:   Step,
        agents: &[HouseholdAgent],
        config: &ModelConfig,
    ) -> &MetricsRecord {
        self.records.push(snapshot(step, agents, config));
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MetricsRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<MetricsRecord> {
        self.records
    }
}
