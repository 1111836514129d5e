//! The per-cell transition rule.
//!
//! Every branch is a pure function of the cell's previous state, its
//! neighbor pressure, and a single uniform draw `seed ∈ [0, 1)`.  Infection
//! and vaccination share that one draw: vaccination only fires on the part
//! of the unit interval just above the infection band, so the two outcomes
//! are mutually exclusive.
//!
//! ```text
//!   Susceptible   0 ──── p_inf ──── p_inf + r_v ──── 1
//!                 │ Infected │ Vaccinated │  stay    │
//!
//!   Infected      0 ── r_r ───────────────────────── 1
//!                 │Recov.│          stay             │
//!
//!   Recovered     0 ── r_m ──── r_m + r_v ────────── 1
//!                 │Susc. │ Vaccinated │   stay       │
//! ```

use epi_core::{EpidemicParams, Individual, State, Tick};

/// Per-tick inputs shared by every cell's transition.
#[derive(Copy, Clone, Debug)]
pub struct RuleContext<'a> {
    pub params:           &'a EpidemicParams,
    /// The tick being computed (already incremented).
    pub tick:             Tick,
    /// Outcome of the hesitancy gate for this tick.
    pub vaccination_open: bool,
}

impl<'a> RuleContext<'a> {
    pub fn new(params: &'a EpidemicParams, tick: Tick, vaccination_open: bool) -> Self {
        Self { params, tick, vaccination_open }
    }

    /// Susceptible individuals may vaccinate from `vaccine_tick` onwards.
    #[inline]
    fn susceptible_may_vaccinate(&self) -> bool {
        self.vaccination_open && self.tick >= self.params.vaccine_tick
    }

    /// Recovered individuals may vaccinate only strictly after `vaccine_tick`.
    #[inline]
    fn recovered_may_vaccinate(&self) -> bool {
        self.vaccination_open && self.tick > self.params.vaccine_tick
    }
}

/// Next state of one cell.
///
/// `pressure` is the number of 4-connected neighbors that were infected in
/// the previous tick.  The infection probability `pressure × r_i` is not
/// clamped: above 1 the cell is infected with certainty.
pub fn transition(previous: State, pressure: u32, seed: f64, ctx: &RuleContext<'_>) -> State {
    let p = ctx.params;
    match previous {
        State::Susceptible => {
            let chance_inf = f64::from(pressure) * p.infection_rate;
            if seed < chance_inf {
                State::Infected
            } else if ctx.susceptible_may_vaccinate() && seed < chance_inf + p.vaccination_rate {
                State::Vaccinated
            } else {
                State::Susceptible
            }
        }
        State::Infected => {
            if seed < p.recovery_rate {
                State::Recovered
            } else {
                State::Infected
            }
        }
        State::Recovered => {
            if seed < p.relapse_rate {
                State::Susceptible
            } else if ctx.recovered_may_vaccinate() && seed < p.relapse_rate + p.vaccination_rate {
                State::Vaccinated
            } else {
                State::Recovered
            }
        }
        State::Vaccinated => State::Vaccinated,
    }
}

/// Number of up/down/left/right neighbors of `(row, col)` that are infected.
/// Cells beyond the grid edge are absent (no wraparound).
pub fn infected_neighbors(cells: &[Individual], side: usize, row: usize, col: usize) -> u32 {
    let infected = |r: usize, c: usize| cells[r * side + c].state() == State::Infected;

    let mut k = 0;
    if row > 0 && infected(row - 1, col) {
        k += 1;
    }
    if row + 1 < side && infected(row + 1, col) {
        k += 1;
    }
    if col > 0 && infected(row, col - 1) {
        k += 1;
    }
    if col + 1 < side && infected(row, col + 1) {
        k += 1;
    }
    k
}
