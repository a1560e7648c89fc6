//! `MetricsObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ca_core::Step;
use ca_sim::{MetricsRecord, SimObserver};

use crate::writer::OutputWriter;
use crate::{MetricsRow, OutputError, OutputResult, RunTag};

/// A [`SimObserver`] that writes every metrics record of a run to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the run returns, check for errors
/// with [`take_error`][Self::take_error].  The writer is finished when the
/// run ends.
pub struct MetricsObserver<W: OutputWriter> {
    writer:     W,
    tag:        RunTag,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> MetricsObserver<W> {
    pub fn new(writer: W, tag: RunTag) -> Self {
        Self { writer, tag, rows: 0, last_error: None }
    }

    /// Rows handed to the writer so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for MetricsObserver<W> {
    fn on_record(&mut self, record: &MetricsRecord) {
        let row = MetricsRow::new(self.tag, record.clone());
        let result = self.writer.write_metrics(std::slice::from_ref(&row));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
