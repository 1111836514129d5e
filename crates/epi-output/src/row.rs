//! Plain data row types written by output backends.

use epi_core::Tick;
use epi_grid::Counts;

/// Aggregate state counts after a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountsRow {
    pub step:        u64,
    pub susceptible: u64,
    pub infected:    u64,
    pub recovered:   u64,
    pub vaccinated:  u64,
}

impl CountsRow {
    pub fn new(tick: Tick, counts: &Counts) -> Self {
        Self {
            step:        tick.0,
            susceptible: counts.susceptible as u64,
            infected:    counts.infected as u64,
            recovered:   counts.recovered as u64,
            vaccinated:  counts.vaccinated as u64,
        }
    }
}
