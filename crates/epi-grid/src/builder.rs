//! Fluent builder for constructing a [`PopulationGrid`].

use epi_core::{EpiError, EpiResult, EpidemicParams, Individual, SimRng, Tick};
use tracing::debug;

use crate::PopulationGrid;

/// Fluent builder for [`PopulationGrid`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                      |
/// |----------------|------------------------------|
/// | `.params(p)`   | `EpidemicParams::default()`  |
/// | `.seed(s)`     | `0`                          |
/// | `.rng(r)`      | `SimRng::new(seed)`          |
///
/// # Example
///
/// ```rust
/// use epi_grid::GridBuilder;
///
/// let grid = GridBuilder::new(100).seed(7).build().unwrap();
/// assert_eq!(grid.count_states().susceptible, 10_000);
/// ```
pub struct GridBuilder {
    side:   usize,
    params: EpidemicParams,
    seed:   u64,
    rng:    Option<SimRng>,
}

impl GridBuilder {
    /// Create a builder for a `side`×`side` grid.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            params: EpidemicParams::default(),
            seed:   0,
            rng:    None,
        }
    }

    pub fn params(mut self, params: EpidemicParams) -> Self {
        self.params = params;
        self
    }

    /// Seed for the grid's RNG.  Ignored if [`rng`](Self::rng) is also called.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Hand the grid an already-constructed stream (e.g. a child of the
    /// driver's root RNG).
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate size and rates, then allocate an all-susceptible grid at
    /// tick 0.
    pub fn build(self) -> EpiResult<PopulationGrid> {
        if self.side == 0 {
            return Err(EpiError::InvalidSize(self.side));
        }
        self.params.validate()?;

        let population = self
            .side
            .checked_mul(self.side)
            .ok_or_else(|| EpiError::Config(format!("grid side {} overflows", self.side)))?;

        debug!(side = self.side, population, "population grid allocated");

        Ok(PopulationGrid {
            side:     self.side,
            cells:    vec![Individual::new(); population],
            previous: Vec::with_capacity(population),
            params:   self.params,
            tick:     Tick::ZERO,
            rng:      self.rng.unwrap_or_else(|| SimRng::new(self.seed)),
        })
    }
}
