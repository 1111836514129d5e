//! Initial infection patterns.

use std::ops::Range;

use epi_core::{EpiError, EpiResult, SimRng, State};
use epi_grid::PopulationGrid;
use tracing::trace;

/// Where the outbreak starts.
///
/// Every variant validates all of its cells against the grid before touching
/// any of them, so a bad pattern leaves the grid unchanged.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Seeding {
    /// Leave the grid all-susceptible.
    #[default]
    None,

    /// Infect exactly these `(row, col)` cells.
    Cells { cells: Vec<(usize, usize)> },

    /// Infect each cell of the half-open block independently with
    /// `probability`.
    Block {
        rows:        Range<usize>,
        cols:        Range<usize>,
        probability: f64,
    },

    /// Infect `count` distinct cells chosen uniformly at random.
    Scattered { count: usize },
}

impl Seeding {
    /// Apply the pattern to `grid`, returning how many cells became infected.
    pub fn apply(&self, grid: &mut PopulationGrid, rng: &mut SimRng) -> EpiResult<usize> {
        let side = grid.size();
        let mut infected = 0;

        match self {
            Seeding::None => {}

            Seeding::Cells { cells } => {
                if let Some(&(row, col)) = cells.iter().find(|&&(r, c)| r >= side || c >= side) {
                    return Err(EpiError::IndexOutOfBounds { row, col, size: side });
                }
                for &(row, col) in cells {
                    infected += usize::from(infect(grid, row, col)?);
                }
            }

            Seeding::Block { rows, cols, probability } => {
                if !probability.is_finite() || !(0.0..=1.0).contains(probability) {
                    return Err(EpiError::InvalidRate { name: "seeding probability", value: *probability });
                }
                if rows.end > side || cols.end > side {
                    return Err(EpiError::IndexOutOfBounds {
                        row:  rows.end.saturating_sub(1),
                        col:  cols.end.saturating_sub(1),
                        size: side,
                    });
                }
                for row in rows.clone() {
                    for col in cols.clone() {
                        if rng.uniform() < *probability {
                            infected += usize::from(infect(grid, row, col)?);
                        }
                    }
                }
            }

            Seeding::Scattered { count } => {
                let population = grid.population();
                if *count > population {
                    return Err(EpiError::Config(format!(
                        "cannot scatter {count} infections over {population} cells"
                    )));
                }
                for i in rand::seq::index::sample(rng.inner(), population, *count) {
                    infected += usize::from(infect(grid, i / side, i % side)?);
                }
            }
        }

        trace!(infected, "seeding applied");
        Ok(infected)
    }
}

/// Mark one cell infected; `false` if it already was.
fn infect(grid: &mut PopulationGrid, row: usize, col: usize) -> EpiResult<bool> {
    if grid.get_state(row, col)? == State::Infected {
        return Ok(false);
    }
    grid.set_state(row, col, State::Infected)?;
    Ok(true)
}
