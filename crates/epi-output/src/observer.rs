//! `CountsObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use epi_core::Tick;
use epi_grid::{PopulationGrid, StepReport};
use epi_sim::SimObserver;
use tracing::warn;

use crate::row::CountsRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that appends one [`CountsRow`] per tick to any
/// [`OutputWriter`] backend, starting with tick 0.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct CountsObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> CountsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows written successfully so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    fn write(&mut self, tick: Tick, grid: &PopulationGrid) {
        let row = CountsRow::new(tick, &grid.count_states());
        let result = self.writer.write_counts(&row);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "count log write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for CountsObserver<W> {
    fn on_start(&mut self, grid: &PopulationGrid) {
        self.write(grid.tick(), grid);
    }

    fn on_tick_end(&mut self, report: &StepReport, grid: &PopulationGrid) {
        self.write(report.tick, grid);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _grid: &PopulationGrid) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
