//! `Population` — every household plus a running adoption count.
//!
//! The adoption rate is read by each household at activation time, so it
//! reflects adoptions made earlier in the same step.  The count is kept
//! up to date by [`Population::activate`].

use std::sync::Arc;

use ca_core::{AgentId, SimRng};
use ca_fleet::BookingPool;
use log::debug;

use crate::{ActivationReport, DecisionParams, HouseholdAgent, HouseholdProfile, ProfileSampler};

/// All households in a run, indexed by [`AgentId`].
#[derive(Clone, Debug, Default)]
pub struct Population {
    agents:        Vec<HouseholdAgent>,
    adopted_count: usize,
}

impl Population {
    /// Sample `count` households, one profile draw each, in `AgentId` order.
    pub fn sample(count: usize, rng: &mut SimRng) -> Self {
        let sampler = ProfileSampler::new();
        let agents: Vec<HouseholdAgent> = (0..count)
            .map(|_| HouseholdAgent::new(sampler.sample(rng)))
            .collect();
        let population = Self { agents, adopted_count: 0 };
        if log::log_enabled!(log::Level::Debug) {
            let mix = population.archetype_counts();
            debug!(
                "sampled {count} households: {} commuter, {} caregiver, {} budget",
                mix[0], mix[1], mix[2]
            );
        }
        population
    }

    /// Build from explicit profiles (e.g. an engineered test population).
    /// No randomness is consumed.
    pub fn from_profiles(profiles: Vec<HouseholdProfile>) -> Self {
        let agents = profiles
            .into_iter()
            .map(|p| HouseholdAgent::new(Arc::new(p)))
            .collect();
        Self { agents, adopted_count: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Read-only view of every household, in `AgentId` order.
    #[inline]
    pub fn agents(&self) -> &[HouseholdAgent] {
        &self.agents
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&HouseholdAgent> {
        self.agents.get(agent.index())
    }

    /// Iterator over all `AgentId`s in ascending index order.  Sizes are
    /// bounded by `ModelConfig::validate`.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn adopted_count(&self) -> usize {
        self.adopted_count
    }

    /// `adopted / max(1, len)`.
    #[inline]
    pub fn adoption_rate(&self) -> f64 {
        self.adopted_count as f64 / self.agents.len().max(1) as f64
    }

    /// Households per archetype, in [`crate::Archetype::ALL`] order.
    pub fn archetype_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for agent in &self.agents {
            counts[agent.profile().archetype.index()] += 1;
        }
        counts
    }

    /// Activate one household against the live adoption rate.
    ///
    /// # Panics
    /// Panics if `agent` is out of bounds; the scheduler only issues ids
    /// below `len()`.
    pub fn activate<P: BookingPool>(
        &mut self,
        agent:  AgentId,
        params: &DecisionParams,
        pool:   &mut P,
        rng:    &mut SimRng,
    ) -> ActivationReport {
        let rate = self.adoption_rate();
        let report = self.agents[agent.index()].activate(rate, params, pool, rng);
        if report.adopted_now {
            self.adopted_count += 1;
        }
        report
    }
}
