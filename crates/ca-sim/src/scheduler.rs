//! Random activation order, drawn fresh every step.

use ca_core::{AgentId, SimRng};

/// Produces a uniformly random permutation of all households each step.
///
/// The order buffer is allocated once and reused.  It is reset to ascending
/// id order before every shuffle so the permutation depends only on the RNG
/// state, not on the previous step's order.
#[derive(Clone, Debug)]
pub struct Scheduler {
    order: Vec<AgentId>,
}

impl Scheduler {
    /// `agent_count` must fit in `u32`; `ModelConfig::validate` enforces it.
    pub fn new(agent_count: usize) -> Self {
        Self { order: (0..agent_count as u32).map(AgentId).collect() }
    }

    /// Number of activations per step.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Draw this step's activation order.  Every agent appears exactly once.
    pub fn shuffled(&mut self, rng: &mut SimRng) -> &[AgentId] {
        for (i, slot) in self.order.iter_mut().enumerate() {
            *slot = AgentId(i as u32);
        }
        rng.shuffle(&mut self.order);
        &self.order
    }
}
