//! The `Sim` struct and its tick loop.

use epi_core::{EpiResult, State, Tick};
use epi_grid::PopulationGrid;
use tracing::info;

use crate::{SimConfig, SimObserver};

/// The run driver: owns the grid and calls it once per tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// The population.  Only the driver steps or mutates it, so `infected`
    /// always matches it.
    grid: PopulationGrid,

    /// Infected count, updated from step reports.
    infected: usize,

    started: bool,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, grid: PopulationGrid) -> Self {
        let infected = grid.count_states().infected;
        Self { config, grid, infected, started: false }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.total_ticks` steps have been applied, or earlier if
    /// `stop_on_extinction` is set and the infection dies out.
    ///
    /// Returns the final tick.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> Tick {
        self.start(observer);

        while self.grid.tick().0 < self.config.total_ticks {
            if self.config.stop_on_extinction && self.is_extinct() {
                info!(tick = self.grid.tick().0, "no infected individuals remain, stopping");
                break;
            }
            self.tick_once(observer);
        }

        let end = self.grid.tick();
        observer.on_sim_end(end, &self.grid);
        info!(tick = end.0, counts = ?self.grid.count_states(), "run finished");
        end
    }

    /// Apply exactly `n` steps from the current position, ignoring
    /// `total_ticks` and `stop_on_extinction`.
    ///
    /// Useful for tests and incremental stepping.  `on_sim_end` is not called.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        self.start(observer);
        for _ in 0..n {
            self.tick_once(observer);
        }
    }

    /// Read-only view of the population between ticks.
    pub fn grid(&self) -> &PopulationGrid {
        &self.grid
    }

    /// Overwrite one cell between ticks (e.g. to inject a new case mid-run).
    pub fn set_state(&mut self, row: usize, col: usize, state: State) -> EpiResult<()> {
        let before = self.grid.get_state(row, col)?;
        self.grid.set_state(row, col, state)?;
        if before == State::Infected {
            self.infected -= 1;
        }
        if state == State::Infected {
            self.infected += 1;
        }
        Ok(())
    }

    /// `true` once no cell is infected.
    pub fn is_extinct(&self) -> bool {
        self.infected == 0
    }

    pub fn infected(&self) -> usize {
        self.infected
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Report tick 0 the first time the run is driven.
    fn start<O: SimObserver>(&mut self, observer: &mut O) {
        if !self.started {
            self.started = true;
            observer.on_start(&self.grid);
        }
    }

    fn tick_once<O: SimObserver>(&mut self, observer: &mut O) {
        let report = self.grid.step();
        self.infected = self.infected + report.new_infections - report.recoveries;
        observer.on_tick_end(&report, &self.grid);

        let interval = self.config.progress_interval_ticks;
        if interval > 0 && report.tick.0.is_multiple_of(interval) {
            info!(
                tick           = report.tick.0,
                infected       = self.infected,
                new_infections = report.new_infections,
                vaccinations   = report.vaccinations,
                "progress"
            );
        }
    }
}
