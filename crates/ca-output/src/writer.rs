//! The `OutputWriter` trait implemented by all backend writers.

use crate::{MetricsRow, OutputResult, SummaryRow};

/// Trait implemented by output backends.
///
/// Observers cannot return errors, so [`MetricsObserver`][crate::MetricsObserver]
/// stores the first one for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write a batch of metrics rows.
    fn write_metrics(&mut self, rows: &[MetricsRow]) -> OutputResult<()>;

    /// Write scenario summary rows.
    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
