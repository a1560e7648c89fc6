//! `ca-experiments` — parameter sweeps for carshare_abm.
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`parameters`] | `ParameterGrid`, `ParameterSet`                      |
//! | [`runner`]     | `run_single`, `run_grid` (rayon), `write_results`    |
//! | [`summary`]    | `summarize_final`: mean end-of-run rates per scenario |
//! | [`error`]      | `ExperimentError`, `ExperimentResult<T>`             |
//!
//! Every run owns an independent engine and RNG, so a sweep produces the
//! same series whatever the thread count.

pub mod error;
pub mod parameters;
pub mod runner;
pub mod summary;


pub use error::{ExperimentError, ExperimentResult};
pub use parameters::{ParameterGrid, ParameterSet};
pub use runner::{RunResult, run_grid, run_single, write_results};
pub use summary::{ScenarioSummary, summarize_final};
