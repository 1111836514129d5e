//! The `PopulationGrid` struct and its step.

use epi_core::{EpiError, EpiResult, EpidemicParams, Individual, SimRng, State, Tick};
use rand::Rng;
use tracing::debug;

use crate::rule::{self, RuleContext};
use crate::{Counts, StepReport};

// ── PopulationGrid ────────────────────────────────────────────────────────────

/// An n×n population and the transition engine that advances it.
///
/// Cells are stored row-major: `(row, col)` lives at `row * side + col`.
/// The grid owns its RNG for the whole run, so two grids built with the same
/// seed, parameters, and seeding produce identical histories.
///
/// Create via [`GridBuilder`][crate::GridBuilder] or [`PopulationGrid::new`].
#[derive(Clone, Debug)]
pub struct PopulationGrid {
    pub(crate) side:     usize,
    pub(crate) cells:    Vec<Individual>,
    /// Pre-tick copy read by every transition decision.  Kept between steps
    /// only to reuse its allocation.
    pub(crate) previous: Vec<Individual>,
    pub(crate) params:   EpidemicParams,
    pub(crate) tick:     Tick,
    pub(crate) rng:      SimRng,
}

impl PopulationGrid {
    /// An all-susceptible `n`×`n` grid with default parameters and seed 0.
    pub fn new(n: usize) -> EpiResult<Self> {
        crate::GridBuilder::new(n).build()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Side length `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.side
    }

    /// Number of individuals, `n²`.
    #[inline]
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Steps applied so far.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn params(&self) -> &EpidemicParams {
        &self.params
    }

    pub fn get_state(&self, row: usize, col: usize) -> EpiResult<State> {
        Ok(self.cells[self.index(row, col)?].state())
    }

    pub fn individual(&self, row: usize, col: usize) -> EpiResult<&Individual> {
        Ok(&self.cells[self.index(row, col)?])
    }

    /// Iterate `(row, col, state)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, State)> + '_ {
        let side = self.side;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, p)| (i / side, i % side, p.state()))
    }

    /// One row of the grid, for renderers that draw line by line.
    pub fn row(&self, row: usize) -> EpiResult<&[Individual]> {
        let start = self.index(row, 0)?;
        Ok(&self.cells[start..start + self.side])
    }

    /// Infected 4-connected neighbors of `(row, col)` in the current grid.
    pub fn infected_neighbors(&self, row: usize, col: usize) -> EpiResult<u32> {
        self.index(row, col)?;
        Ok(rule::infected_neighbors(&self.cells, self.side, row, col))
    }

    /// Tally every cell.  O(n²); never mutates.
    pub fn count_states(&self) -> Counts {
        self.cells.iter().map(Individual::state).collect()
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    /// Overwrite one cell.  Intended for initial seeding and tests.
    pub fn set_state(&mut self, row: usize, col: usize, state: State) -> EpiResult<()> {
        let i = self.index(row, col)?;
        self.cells[i].set_state(state);
        Ok(())
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance one tick using the grid's own RNG.
    ///
    /// Draws exactly one uniform per cell in row-major order.  With the
    /// `parallel` feature each row instead draws from its own child stream
    /// (see [`SimRng::child`]); still reproducible, but not the same history
    /// as the serial build for a given seed.
    pub fn step(&mut self) -> StepReport {
        let vaccination_open = self.begin_tick();
        let ctx = RuleContext::new(&self.params, self.tick, vaccination_open);
        let report = StepReport::new(self.tick, vaccination_open);

        #[cfg(not(feature = "parallel"))]
        let report = sweep(&self.previous, &mut self.cells, self.side, &ctx, &mut self.rng, report);

        #[cfg(feature = "parallel")]
        let report = sweep_parallel(&self.previous, &mut self.cells, self.side, &ctx, &mut self.rng, report);

        log_step(&report);
        report
    }

    /// Advance one tick drawing from a caller-supplied RNG, one uniform per
    /// cell in row-major order.  Always sequential.
    pub fn step_with<R: Rng>(&mut self, rng: &mut R) -> StepReport {
        let vaccination_open = self.begin_tick();
        let ctx = RuleContext::new(&self.params, self.tick, vaccination_open);
        let report = StepReport::new(self.tick, vaccination_open);
        let report = sweep(&self.previous, &mut self.cells, self.side, &ctx, rng, report);
        log_step(&report);
        report
    }

    /// Run `n` steps, returning the report of each.
    pub fn step_n(&mut self, n: u64) -> Vec<StepReport> {
        (0..n).map(|_| self.step()).collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Snapshot, advance the clock, and evaluate the hesitancy gate against
    /// the pre-tick state.
    fn begin_tick(&mut self) -> bool {
        self.previous.clone_from(&self.cells);
        self.tick.advance();

        let vaccinated = self
            .previous
            .iter()
            .filter(|p| p.state() == State::Vaccinated)
            .count();
        let fraction = vaccinated as f64 / self.previous.len() as f64;
        fraction < self.params.vaccination_ceiling()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> EpiResult<usize> {
        if row >= self.side || col >= self.side {
            return Err(EpiError::IndexOutOfBounds { row, col, size: self.side });
        }
        Ok(row * self.side + col)
    }
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

/// Apply the rule to one row.  Reads only `previous`; writes only `out`.
fn update_row<F: FnMut() -> f64>(
    previous: &[Individual],
    side:     usize,
    row:      usize,
    out:      &mut [Individual],
    ctx:      &RuleContext<'_>,
    mut draw: F,
) -> StepReport {
    let mut tally = StepReport::default();
    for (col, cell) in out.iter_mut().enumerate() {
        let seed = draw();
        let before = previous[row * side + col].state();
        let pressure = match before {
            State::Susceptible => rule::infected_neighbors(previous, side, row, col),
            _ => 0,
        };
        let after = rule::transition(before, pressure, seed, ctx);
        tally.record(before, after);
        cell.set_state(after);
    }
    tally
}

/// Row-major sweep drawing from a single stream.
fn sweep<R: Rng + ?Sized>(
    previous: &[Individual],
    cells:    &mut [Individual],
    side:     usize,
    ctx:      &RuleContext<'_>,
    rng:      &mut R,
    report:   StepReport,
) -> StepReport {
    cells
        .chunks_mut(side)
        .enumerate()
        .fold(report, |acc, (row, out)| {
            acc.merge(update_row(previous, side, row, out, ctx, || rng.r#gen::<f64>()))
        })
}

/// Parallel sweep: one child stream per row, derived in row order from the
/// grid's RNG before any row is processed.
#[cfg(feature = "parallel")]
fn sweep_parallel(
    previous: &[Individual],
    cells:    &mut [Individual],
    side:     usize,
    ctx:      &RuleContext<'_>,
    rng:      &mut SimRng,
    report:   StepReport,
) -> StepReport {
    use rayon::prelude::*;

    let mut streams: Vec<SimRng> = (0..side).map(|row| rng.child(row as u64)).collect();

    let tally = cells
        .par_chunks_mut(side)
        .zip(streams.par_iter_mut())
        .enumerate()
        .map(|(row, (out, stream))| update_row(previous, side, row, out, ctx, || stream.uniform()))
        .reduce(StepReport::default, StepReport::merge);

    report.merge(tally)
}

fn log_step(report: &StepReport) {
    debug!(
        tick             = report.tick.0,
        new_infections   = report.new_infections,
        recoveries       = report.recoveries,
        relapses         = report.relapses,
        vaccinations     = report.vaccinations,
        vaccination_open = report.vaccination_open,
        "grid stepped"
    );
}
