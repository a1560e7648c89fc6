//! Parameter grids: a base configuration plus value lists to sweep.

use ca_core::ModelConfig;
use ca_output::RunTag;

/// One fully-specified run of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Index of the non-seed parameter combination.
    pub scenario_id: u32,
    /// Position of this run in the expanded grid.
    pub run_id:      u32,
    pub config:      ModelConfig,
}

impl ParameterSet {
    pub fn tag(&self) -> RunTag {
        RunTag { scenario_id: self.scenario_id, run_id: self.run_id, seed: self.config.seed }
    }
}

/// A Cartesian grid over the policy parameters, replicated over seeds.
///
/// An empty list keeps the base configuration's value for that field.
/// Expansion order is fleet capacity, booking friction, access price,
/// booking failure probability, drop-ownership probability, then seed
/// (innermost).
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    pub base:                 ModelConfig,
    pub fleet_capacities:     Vec<usize>,
    pub booking_frictions:    Vec<f64>,
    pub access_prices:        Vec<f64>,
    pub booking_fail_probs:   Vec<f64>,
    pub drop_ownership_probs: Vec<f64>,
    pub seeds:                Vec<u64>,
}

impl ParameterGrid {
    /// A grid with a single scenario: `base` itself.
    pub fn new(base: ModelConfig) -> Self {
        Self {
            base,
            fleet_capacities:     Vec::new(),
            booking_frictions:    Vec::new(),
            access_prices:        Vec::new(),
            booking_fail_probs:   Vec::new(),
            drop_ownership_probs: Vec::new(),
            seeds:                Vec::new(),
        }
    }

    /// Fleet sizes {10, 25, 50} × friction {0.2, 0.4, 0.6}, five seeds each,
    /// 500 households over 80 steps.
    pub fn reference() -> Self {
        let base = ModelConfig {
            population_size:     500,
            step_count:          80,
            access_price:        0.6,
            booking_fail_prob:   0.10,
            drop_ownership_prob: 0.55,
            ..ModelConfig::default()
        };
        Self::new(base)
            .fleet_capacities(vec![10, 25, 50])
            .booking_frictions(vec![0.2, 0.4, 0.6])
            .seeds((1..=5).collect())
    }

    pub fn fleet_capacities(mut self, values: Vec<usize>) -> Self {
        self.fleet_capacities = values;
        self
    }

    pub fn booking_frictions(mut self, values: Vec<f64>) -> Self {
        self.booking_frictions = values;
        self
    }

    pub fn access_prices(mut self, values: Vec<f64>) -> Self {
        self.access_prices = values;
        self
    }

    pub fn booking_fail_probs(mut self, values: Vec<f64>) -> Self {
        self.booking_fail_probs = values;
        self
    }

    pub fn drop_ownership_probs(mut self, values: Vec<f64>) -> Self {
        self.drop_ownership_probs = values;
        self
    }

    pub fn seeds(mut self, values: Vec<u64>) -> Self {
        self.seeds = values;
        self
    }

    /// Number of distinct non-seed combinations.
    pub fn scenario_count(&self) -> usize {
        or_base(&self.fleet_capacities, self.base.fleet_capacity).len()
            * or_base(&self.booking_frictions, self.base.booking_friction).len()
            * or_base(&self.access_prices, self.base.access_price).len()
            * or_base(&self.booking_fail_probs, self.base.booking_fail_prob).len()
            * or_base(&self.drop_ownership_probs, self.base.drop_ownership_prob).len()
    }

    /// Total number of runs the grid expands to.
    pub fn run_count(&self) -> usize {
        self.scenario_count() * or_base(&self.seeds, self.base.seed).len()
    }

    /// Expand into one [`ParameterSet`] per (scenario, seed).
    pub fn expand(&self) -> Vec<ParameterSet> {
        let capacities = or_base(&self.fleet_capacities, self.base.fleet_capacity);
        let frictions = or_base(&self.booking_frictions, self.base.booking_friction);
        let prices = or_base(&self.access_prices, self.base.access_price);
        let fail_probs = or_base(&self.booking_fail_probs, self.base.booking_fail_prob);
        let drop_probs = or_base(&self.drop_ownership_probs, self.base.drop_ownership_prob);
        let seeds = or_base(&self.seeds, self.base.seed);

        let mut sets = Vec::with_capacity(self.run_count());
        let mut scenario_id = 0u32;
        for &fleet_capacity in &capacities {
            for &booking_friction in &frictions {
                for &access_price in &prices {
                    for &booking_fail_prob in &fail_probs {
                        for &drop_ownership_prob in &drop_probs {
                            for &seed in &seeds {
                                let config = ModelConfig {
                                    seed,
                                    fleet_capacity,
                                    booking_friction,
                                    access_price,
                                    booking_fail_prob,
                                    drop_ownership_prob,
                                    ..self.base.clone()
                                };
                                let run_id = sets.len() as u32;
                                sets.push(ParameterSet { scenario_id, run_id, config });
                            }
                            scenario_id += 1;
                        }
                    }
                }
            }
        }
        sets
    }
}

fn or_base<T: Copy>(values: &[T], base: T) -> Vec<T> {
    if values.is_empty() { vec![base] } else { values.to_vec() }
}
