//! Simulation observer trait for progress reporting and data collection.

use epi_core::Tick;
use epi_grid::{PopulationGrid, StepReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers get read-only access to the
/// grid: nothing they do can feed back into the model.
///
/// # Example: infection tracker
///
/// ```rust
/// use epi_grid::{PopulationGrid, StepReport};
/// use epi_sim::SimObserver;
///
/// struct PeakTracker { peak: usize }
///
/// impl SimObserver for PeakTracker {
///     fn on_tick_end(&mut self, _report: &StepReport, grid: &PopulationGrid) {
///         self.peak = self.peak.max(grid.count_states().infected);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first step, with the seeded tick-0 grid.
    fn on_start(&mut self, _grid: &PopulationGrid) {}

    /// Called after every step.  `report.tick` is the tick the grid now
    /// reflects.
    fn on_tick_end(&mut self, _report: &StepReport, _grid: &PopulationGrid) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick, _grid: &PopulationGrid) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
