//! The `Sim` struct and its step loop.

use ca_agent::{DecisionParams, Population};
use ca_core::{ModelConfig, SimRng, Step};
use ca_fleet::SharedFleetPool;
use log::trace;

use crate::{MetricsCollector, MetricsRecord, Scheduler, SimObserver};

/// Per-step totals handed to [`SimObserver::on_step_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub step:                 Step,
    pub activated:            usize,
    pub adoptions:            u32,
    pub vehicles_dropped:     u32,
    pub bookings_granted:     u32,
    pub capacity_failures:    u32,
    pub reliability_failures: u32,
}

/// The simulation engine.
///
/// Owns the validated configuration, the population, the shared fleet, the
/// scheduler, the metrics series and the single RNG every stochastic call
/// draws from.  Create via [`SimBuilder`][crate::SimBuilder]; once built, a
/// run cannot fail.
pub struct Sim {
    pub(crate) config:          ModelConfig,
    pub(crate) params:          DecisionParams,
    pub(crate) population:      Population,
    pub(crate) fleet:           SharedFleetPool,
    pub(crate) scheduler:       Scheduler,
    pub(crate) collector:       MetricsCollector,
    pub(crate) rng:             SimRng,
    pub(crate) step:            Step,
    pub(crate) initial_emitted: bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `step_count` steps and return the full metrics series: the initial
    /// snapshot followed by one record per step.  Consumes the engine.
    pub fn run<O: SimObserver>(mut self, step_count: u64, observer: &mut O) -> Vec<MetricsRecord> {
        self.run_steps(step_count, observer);
        observer.on_sim_end(self.step);
        self.collector.into_records()
    }

    /// [`run`][Self::run] for the configured `step_count`.
    pub fn run_to_end<O: SimObserver>(self, observer: &mut O) -> Vec<MetricsRecord> {
        let steps = self.config.step_count;
        self.run(steps, observer)
    }

    /// Run exactly `n` more steps, keeping the engine for inspection.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        if !self.initial_emitted {
            if let Some(initial) = self.collector.records().first() {
                observer.on_record(initial);
            }
            self.initial_emitted = true;
        }
        for _ in 0..n {
            self.process_step(observer);
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Read-only view of the households.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Read-only view of the fleet (availability as left by the last step).
    pub fn fleet(&self) -> &SharedFleetPool {
        &self.fleet
    }

    /// Last completed step; `Step(0)` before the first step runs.
    pub fn current_step(&self) -> Step {
        self.step
    }

    /// Metrics collected so far.
    pub fn metrics(&self) -> &[MetricsRecord] {
        self.collector.records()
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: SimObserver>(&mut self, observer: &mut O) {
        let step = self.step.next();
        observer.on_step_start(step);

        // ── Phase 1: replenish the fleet ──────────────────────────────────
        self.fleet.reset();
        observer.on_fleet_reset(step, self.fleet.available());

        // ── Phase 2: draw activation order ────────────────────────────────
        //
        // Field-level borrows: the order slice borrows `scheduler` while the
        // loop mutates `population`, `fleet` and `rng`.
        let order = self.scheduler.shuffled(&mut self.rng);

        // ── Phase 3: activate every household once, in order ──────────────
        let mut summary = StepSummary { step, activated: order.len(), ..StepSummary::default() };
        for &agent in order {
            let report = self.population.activate(agent, &self.params, &mut self.fleet, &mut self.rng);
            summary.adoptions += u32::from(report.adopted_now);
            summary.vehicles_dropped += u32::from(report.dropped_vehicle_now);
            summary.bookings_granted += report.granted;
            summary.capacity_failures += report.capacity_failures;
            summary.reliability_failures += report.reliability_failures;
            observer.on_activation(step, agent, &report);
        }
        debug_assert!(summary.bookings_granted as usize <= self.fleet.capacity());

        trace!(
            "{step}: {} adoptions, {} cars dropped, {} granted, {} capacity / {} reliability failures",
            summary.adoptions,
            summary.vehicles_dropped,
            summary.bookings_granted,
            summary.capacity_failures,
            summary.reliability_failures,
        );
        observer.on_step_end(step, &summary);

        // ── Phase 4: collect metrics ──────────────────────────────────────
        let record = self.collector.collect(step, self.population.agents(), &self.config);
        observer.on_record(record);

        self.step = step;
    }
}
