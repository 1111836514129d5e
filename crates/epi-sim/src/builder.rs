//! Fluent builder for constructing a [`Sim`].

use epi_core::SimRng;
use epi_grid::{GridBuilder, PopulationGrid};
use tracing::info;

use crate::{Sim, SimConfig, SimError, SimResult};

/// Stream offsets under the master seed.
const SEEDING_STREAM: u64 = 0;
const GRID_STREAM:    u64 = 1;

/// Fluent builder for [`Sim`].
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config).build()?;
/// sim.run(&mut observer);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    grid:   Option<PopulationGrid>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, grid: None }
    }

    /// Drive an already-built and seeded grid instead of building one from
    /// the config.  `config.side`, `config.params`, and `config.seeding` are
    /// then ignored.
    pub fn grid(mut self, grid: PopulationGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Build the grid (unless one was supplied), apply the seeding pattern,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;

        let grid = match self.grid {
            Some(grid) => {
                if grid.tick().0 > config.total_ticks {
                    return Err(SimError::Config(format!(
                        "supplied grid is already at tick {} past total_ticks {}",
                        grid.tick().0,
                        config.total_ticks
                    )));
                }
                grid
            }
            None => {
                let mut root = SimRng::new(config.seed);
                let mut seeding_rng = root.child(SEEDING_STREAM);
                let grid_rng = root.child(GRID_STREAM);

                let mut grid = GridBuilder::new(config.side)
                    .params(config.params.clone())
                    .rng(grid_rng)
                    .build()?;
                let infected = config.seeding.apply(&mut grid, &mut seeding_rng)?;
                info!(side = config.side, seed = config.seed, infected, "population seeded");
                grid
            }
        };

        Ok(Sim::new(config, grid))
    }
}
