//! The `OutputWriter` trait implemented by output backends.

use crate::{AgentSnapshotRow, OutputResult, StepSummaryRow};

/// Sink for step summaries and cell snapshots.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which stores them for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write a batch of cell snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Called at the end of every `simulate` call; safe to call any number
    /// of times, and writing may continue afterwards.
    fn finish(&mut self) -> OutputResult<()>;
}
