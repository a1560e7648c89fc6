//! End-of-run aggregation across seeds.

use std::collections::BTreeMap;

use crate::RunResult;

/// Mean final outcomes of one scenario.
pub type ScenarioSummary = ca_output::SummaryRow;

/// Average the final adoption, ownership and failed-booking rates of every
/// scenario over its seeds.  Output is sorted by `scenario_id`; runs with an
/// empty series are skipped.
pub fn summarize_final(results: &[RunResult]) -> Vec<ScenarioSummary> {
    let mut groups: BTreeMap<u32, Vec<&RunResult>> = BTreeMap::new();
    for result in results.iter().filter(|r| r.final_record().is_some()) {
        groups.entry(result.set.scenario_id).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(scenario_id, runs)| {
            let config = &runs[0].set.config;
            let mean = |f: fn(&ca_sim::MetricsRecord) -> f64| {
                let total: f64 = runs.iter().filter_map(|r| r.final_record()).map(f).sum();
                total / runs.len() as f64
            };
            ScenarioSummary {
                scenario_id,
                fleet_capacity:           config.fleet_capacity,
                access_price:             config.access_price,
                booking_fail_prob:        config.booking_fail_prob,
                booking_friction:         config.booking_friction,
                drop_ownership_prob:      config.drop_ownership_prob,
                runs:                     runs.len(),
                mean_adoption_rate:       mean(|r| r.adoption_rate),
                mean_ownership_rate:      mean(|r| r.ownership_rate),
                mean_failed_booking_rate: mean(|r| r.failed_booking_rate),
            }
        })
        .collect()
}
