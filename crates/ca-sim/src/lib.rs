//! `ca-sim` — the simulation engine for carshare_abm.
//!
//! # Step loop
//!
//! ```text
//! build:  validate config → seed SimRng → sample profiles → record step 0
//! for step in 1..=n:
//!   ① Reset      — fleet availability back to full capacity.
//!   ② Schedule   — uniformly random permutation of all households.
//!   ③ Activate   — each household, in that order: adoption trial,
//!                  ownership-drop trial, one booking attempt per trip.
//!   ④ Collect    — append one MetricsRecord for the step.
//! ```
//!
//! Everything is single-threaded.  The fleet is shared and mutated in
//! activation order, so order is part of the model: households activated
//! early get first claim on scarce cars.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ca_core::ModelConfig;
//! use ca_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(ModelConfig::default()).build()?;
//! let series = sim.run(80, &mut NoopObserver);
//! assert_eq!(series.len(), 81);
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod scheduler;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{MetricsCollector, MetricsRecord, snapshot};
pub use observer::{LogObserver, NoopObserver, SimObserver};
pub use scheduler::Scheduler;
pub use sim::{Sim, StepSummary};
