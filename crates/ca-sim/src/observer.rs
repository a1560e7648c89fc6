//! Simulation observer trait for progress reporting and data collection.

use ca_agent::ActivationReport;
use ca_core::{AgentId, Step};
use log::info;

use crate::{MetricsRecord, StepSummary};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see read-only data and
/// cannot influence the run.
///
/// # Example — adoption printer
///
/// ```rust,ignore
/// struct AdoptionPrinter;
///
/// impl SimObserver for AdoptionPrinter {
///     fn on_record(&mut self, record: &MetricsRecord) {
///         println!("step {}: {:.3}", record.step, record.adoption_rate);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before the fleet reset.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called right after the fleet is replenished.  `available` always
    /// equals the configured capacity.
    fn on_fleet_reset(&mut self, _step: Step, _available: usize) {}

    /// Called after each household's activation, in activation order.
    fn on_activation(&mut self, _step: Step, _agent: AgentId, _report: &ActivationReport) {}

    /// Called once all households have been activated.
    fn on_step_end(&mut self, _step: Step, _summary: &StepSummary) {}

    /// Called for every metrics record appended to the series, including the
    /// initial step-0 snapshot (delivered at the start of the first run call).
    fn on_record(&mut self, _record: &MetricsRecord) {}

    /// Called once by `Sim::run` / `Sim::run_to_end` after the final step.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs the metrics record every `interval` steps at `info` level, plus the
/// final record.
pub struct LogObserver {
    interval: u64,
    last:     Option<MetricsRecord>,
}

impl LogObserver {
    /// `interval` of 0 logs only the final record.
    pub fn new(interval: u64) -> Self {
        Self { interval, last: None }
    }
}

impl SimObserver for LogObserver {
    fn on_record(&mut self, record: &MetricsRecord) {
        if self.interval > 0 && record.step % self.interval == 0 {
            info!(
                "step {:>4}: adoption {:.3}  ownership {:.3}  failed bookings {:.3}",
                record.step,
                record.adoption_rate,
                record.ownership_rate,
                record.failed_booking_rate,
            );
        }
        self.last = Some(record.clone());
    }

    fn on_sim_end(&mut self, final_step: Step) {
        if let Some(r) = &self.last {
            info!(
                "finished at {final_step}: adoption {:.3}  ownership {:.3}  failed bookings {:.3}",
                r.adoption_rate, r.ownership_rate, r.failed_booking_rate,
            );
        }
    }
}
