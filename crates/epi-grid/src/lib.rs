//! `epi-grid`: the epidemic state-transition engine.
//!
//! An n×n arena of [`Individual`](epi_core::Individual)s updated once per
//! tick by a per-cell Markov rule coupled through 4-connected neighbor
//! pressure.
//!
//! # Snapshot-then-apply
//!
//! ```text
//! step():
//!   ① Snapshot   copy the live grid into `previous`.
//!   ② Clock      t += 1.
//!   ③ Gate       vaccination open iff vaccinated/n² < 1 - hesitancy
//!                 (measured on the snapshot).
//!   ④ Sweep      one uniform draw per cell, row-major; every decision
//!                 reads `previous`, every write goes to the live grid.
//! ```
//!
//! No cell ever observes another cell's new state within the same tick, so
//! the sweep order only matters for which draw a cell receives.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `step()` sweeps rows on Rayon, one RNG stream per row.  |
//! | `serde`    | Serde derives on `Counts` and `StepReport`.             |
//!
//! # Quick-start
//!
//! ```rust
//! use epi_core::{EpidemicParams, State};
//! use epi_grid::GridBuilder;
//!
//! let mut grid = GridBuilder::new(5)
//!     .params(EpidemicParams { infection_rate: 1.0, ..EpidemicParams::frozen() })
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! grid.set_state(2, 2, State::Infected).unwrap();
//! grid.step();
//! assert_eq!(grid.count_states().infected, 5);
//! ```

pub mod builder;
pub mod counts;
pub mod grid;
pub mod rule;


pub use builder::GridBuilder;
pub use counts::{Counts, StepReport};
pub use grid::PopulationGrid;
pub use rule::{RuleContext, transition};
