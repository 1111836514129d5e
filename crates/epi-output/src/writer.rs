//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CountsRow, OutputResult};

/// A sink for per-tick count rows.
///
/// Errors are stored by [`CountsObserver`](crate::CountsObserver) and
/// retrieved with `take_error` after the run.
pub trait OutputWriter {
    /// Append one row.
    fn write_counts(&mut self, row: &CountsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
