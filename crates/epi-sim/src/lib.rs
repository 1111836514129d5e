//! `epi-sim`: run driver for the epigrid model.
//!
//! # Tick loop
//!
//! ```text
//! build:  root seed ─┬─ child(0) → initial infections (Seeding)
//!                    └─ child(1) → grid RNG
//! run:    on_start(grid)                      ← tick 0, post-seeding
//!         while tick < total_ticks:
//!             report = grid.step()
//!             on_tick_end(report, grid)
//!         on_sim_end(tick, grid)
//! ```
//!
//! Every tick boundary is a consistent, fully-applied state, so a run may
//! stop at any of them.
//!
//! # Quick-start
//!
//! ```rust
//! use epi_sim::{NoopObserver, Seeding, SimBuilder, SimConfig};
//!
//! let config = SimConfig {
//!     side:        20,
//!     total_ticks: 10,
//!     seeding:     Seeding::Cells { cells: vec![(10, 10)] },
//!     ..SimConfig::default()
//! };
//! let mut sim = SimBuilder::new(config).build().unwrap();
//! let end = sim.run(&mut NoopObserver);
//! assert_eq!(end.0, 10);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod seeding;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use seeding::Seeding;
pub use sim::Sim;
