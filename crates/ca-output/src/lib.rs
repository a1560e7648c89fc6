//! `ca-output` — simulation output writers for carshare_abm.
//!
//! | Writer               | Files created                          |
//! |----------------------|----------------------------------------|
//! | [`MetricsCsvWriter`] | `model_runs.csv`, `final_summary.csv`  |
//!
//! Writers implement [`OutputWriter`].  [`MetricsObserver`] implements
//! `ca_sim::SimObserver` and streams every metrics record of a run into a
//! writer as it is produced.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ca_output::{MetricsCsvWriter, MetricsObserver, RunTag};
//!
//! let writer = MetricsCsvWriter::new(Path::new("./output"))?;
//! let mut obs = MetricsObserver::new(writer, RunTag::single(config.seed));
//! sim.run_to_end(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::MetricsCsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{MetricsRow, RunTag, SummaryRow};
pub use writer::OutputWriter;
