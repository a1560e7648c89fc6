//! Single and parallel execution of parameter sets.

use std::time::Instant;

use ca_output::{MetricsRow, OutputWriter};
use ca_sim::{MetricsRecord, NoopObserver, SimBuilder};
use log::{debug, info};
use rayon::prelude::*;

use crate::summary::summarize_final;
use crate::{ExperimentError, ExperimentResult, ParameterSet};

/// The metrics series of one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub set:     ParameterSet,
    /// Initial snapshot followed by one record per step.
    pub records: Vec<MetricsRecord>,
}

impl RunResult {
    /// The end-of-run record.
    pub fn final_record(&self) -> Option<&MetricsRecord> {
        self.records.last()
    }

    /// The series as output rows tagged with this run's ids.
    pub fn rows(&self) -> Vec<MetricsRow> {
        let tag = self.set.tag();
        self.records.iter().map(|r| MetricsRow::new(tag, r.clone())).collect()
    }
}

/// Build one engine from `set` and run it for its configured step count.
pub fn run_single(set: &ParameterSet) -> ExperimentResult<RunResult> {
    let sim = SimBuilder::new(set.config.clone()).build()?;
    let records = sim.run_to_end(&mut NoopObserver);
    debug!(
        "run {} (scenario {}, seed {}) finished: adoption {:.3}",
        set.run_id,
        set.scenario_id,
        set.config.seed,
        records.last().map_or(0.0, |r| r.adoption_rate),
    );
    Ok(RunResult { set: set.clone(), records })
}

/// Run every set in parallel on a dedicated rayon pool.
///
/// `num_threads = None` uses rayon's default.  Results come back in input
/// order.  The first failing set aborts the sweep with its error.
pub fn run_grid(sets: &[ParameterSet], num_threads: Option<usize>) -> ExperimentResult<Vec<RunResult>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .map_err(|e| ExperimentError::Grid(format!("failed to create thread pool: {e}")))?;

    info!("running {} parameter sets on {} threads", sets.len(), pool.current_num_threads());
    let started = Instant::now();
    let results = pool.install(|| sets.par_iter().map(run_single).collect::<ExperimentResult<Vec<_>>>())?;
    info!("sweep finished in {:.2?}", started.elapsed());
    Ok(results)
}

/// Write every run's series and the per-scenario summary to `writer`, then
/// finish it.
pub fn write_results<W: OutputWriter>(results: &[RunResult], writer: &mut W) -> ExperimentResult<()> {
    for result in results {
        writer.write_metrics(&result.rows())?;
    }
    writer.write_summary(&summarize_final(results))?;
    writer.finish()?;
    Ok(())
}
