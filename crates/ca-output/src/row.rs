//! Plain data row types written by output backends.

use ca_sim::MetricsRecord;

/// Identifies which run of an experiment a metrics row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTag {
    /// Index of the parameter combination (seeds excluded).
    pub scenario_id: u32,
    /// Index of the run across the whole experiment.
    pub run_id:      u32,
    pub seed:        u64,
}

impl RunTag {
    /// Tag for a stand-alone run outside any grid.
    pub fn single(seed: u64) -> Self {
        Self { scenario_id: 0, run_id: 0, seed }
    }
}

/// One metrics record, tagged with its run.  One row of `model_runs.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub tag:    RunTag,
    pub record: MetricsRecord,
}

impl MetricsRow {
    pub fn new(tag: RunTag, record: MetricsRecord) -> Self {
        Self { tag, record }
    }
}

/// Mean end-of-run outcomes for one scenario across its seeds.  One row of
/// `final_summary.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub scenario_id:              u32,
    pub fleet_capacity:           usize,
    pub access_price:             f64,
    pub booking_fail_prob:        f64,
    pub booking_friction:         f64,
    pub drop_ownership_prob:      f64,
    /// Number of seeds averaged.
    pub runs:                     usize,
    pub mean_adoption_rate:       f64,
    pub mean_ownership_rate:      f64,
    pub mean_failed_booking_rate: f64,
}
