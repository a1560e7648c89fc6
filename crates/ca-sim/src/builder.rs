//! Fluent builder for constructing a [`Sim`].

use ca_agent::{DecisionParams, HouseholdProfile, Population};
use ca_core::{ModelConfig, SimRng, Step};
use ca_fleet::SharedFleetPool;
use log::debug;

use crate::{MetricsCollector, Scheduler, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`ModelConfig`] — seed, population size, fleet, prices, probabilities
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                          |
/// |------------------|--------------------------------------------------|
/// | `.profiles(v)`   | One archetype profile sampled per household      |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config).build()?;
/// let series = sim.run_to_end(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:   ModelConfig,
    profiles: Option<Vec<HouseholdProfile>>,
}

impl SimBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self { config, profiles: None }
    }

    /// Supply explicit household profiles (must be length `population_size`).
    ///
    /// Skips archetype sampling, so no random draws happen at construction.
    pub fn profiles(mut self, profiles: Vec<HouseholdProfile>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Validate the configuration, seed the RNG, build the population and
    /// record the initial metrics snapshot.
    ///
    /// Validation happens before the RNG exists, so a rejected configuration
    /// never consumes a draw.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let count = self.config.population_size;
        if let Some(p) = &self.profiles {
            if p.len() != count {
                return Err(SimError::AgentCountMismatch {
                    expected: count,
                    got:      p.len(),
                    what:     "household profiles",
                });
            }
        }

        let mut rng = SimRng::new(self.config.seed);
        let population = match self.profiles {
            Some(p) => Population::from_profiles(p),
            None    => Population::sample(count, &mut rng),
        };

        let fleet = SharedFleetPool::new(self.config.fleet_capacity, self.config.booking_fail_prob);
        let params = DecisionParams::from(&self.config);

        let mut collector = MetricsCollector::new();
        collector.collect(Step::INITIAL, population.agents(), &self.config);

        debug!(
            "built sim: seed {}, {} households, {} shared cars, supply factor {:.4}",
            self.config.seed, count, self.config.fleet_capacity, params.supply_factor,
        );

        Ok(Sim {
            scheduler: Scheduler::new(count),
            config: self.config,
            params,
            population,
            fleet,
            collector,
            rng,
            step: Step::INITIAL,
            initial_emitted: false,
        })
    }
}
