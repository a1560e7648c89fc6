//! CSV output backend.
//!
//! Writes two files in the configured output directory:
//! - `model_runs.csv`, created up front
//! - `final_summary.csv`, created on the first summary write

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MetricsRow, OutputResult, SummaryRow};

pub const METRICS_FILE: &str = "model_runs.csv";
pub const SUMMARY_FILE: &str = "final_summary.csv";

pub const METRICS_HEADER: [&str; 11] = [
    "scenario_id",
    "run_id",
    "seed",
    "step",
    "adoption_rate",
    "ownership_rate",
    "failed_booking_rate",
    "fleet_capacity",
    "access_price",
    "booking_fail_prob",
    "booking_friction",
];

pub const SUMMARY_HEADER: [&str; 10] = [
    "scenario_id",
    "fleet_capacity",
    "access_price",
    "booking_fail_prob",
    "booking_friction",
    "drop_ownership_prob",
    "runs",
    "mean_adoption_rate",
    "mean_ownership_rate",
    "mean_failed_booking_rate",
];

/// Writes simulation output to CSV files.
///
/// A writer that never receives summary rows leaves no `final_summary.csv`.
pub struct MetricsCsvWriter {
    dir:       PathBuf,
    metrics:   Writer<File>,
    summaries: Option<Writer<File>>,
    finished:  bool,
}

impl MetricsCsvWriter {
    /// Create `dir` if needed, open (or truncate) `model_runs.csv` and write
    /// its header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut metrics = Writer::from_path(dir.join(METRICS_FILE))?;
        metrics.write_record(METRICS_HEADER)?;

        Ok(Self { dir: dir.to_path_buf(), metrics, summaries: None, finished: false })
    }

    fn summaries(&mut self) -> OutputResult<&mut Writer<File>> {
        let writer = match self.summaries.take() {
            Some(w) => w,
            None => {
                let mut w = Writer::from_path(self.dir.join(SUMMARY_FILE))?;
                w.write_record(SUMMARY_HEADER)?;
                w
            }
        };
        Ok(self.summaries.insert(writer))
    }
}

impl OutputWriter for MetricsCsvWriter {
    fn write_metrics(&mut self, rows: &[MetricsRow]) -> OutputResult<()> {
        for row in rows {
            let r = &row.record;
            self.metrics.write_record(&[
                row.tag.scenario_id.to_string(),
                row.tag.run_id.to_string(),
                row.tag.seed.to_string(),
                r.step.to_string(),
                r.adoption_rate.to_string(),
                r.ownership_rate.to_string(),
                r.failed_booking_rate.to_string(),
                r.fleet_capacity.to_string(),
                r.access_price.to_string(),
                r.booking_fail_prob.to_string(),
                r.booking_friction.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
        let summaries = self.summaries()?;
        for row in rows {
            summaries.write_record(&[
                row.scenario_id.to_string(),
                row.fleet_capacity.to_string(),
                row.access_price.to_string(),
                row.booking_fail_prob.to_string(),
                row.booking_friction.to_string(),
                row.drop_ownership_prob.to_string(),
                row.runs.to_string(),
                row.mean_adoption_rate.to_string(),
                row.mean_ownership_rate.to_string(),
                row.mean_failed_booking_rate.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        if let Some(summaries) = self.summaries.as_mut() {
            summaries.flush()?;
        }
        Ok(())
    }
}
