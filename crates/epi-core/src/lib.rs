//! `epi-core`: foundational types for the `epigrid` epidemic model.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`state`]       | `State` enum, `Individual`                            |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (run-wide, seedable)                         |
//! | [`params`]      | `EpidemicParams` (rates and vaccine availability)     |
//! | [`error`]       | `EpiError`, `EpiResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod params;
pub mod rng;
pub mod state;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EpiError, EpiResult};
pub use params::EpidemicParams;
pub use rng::SimRng;
pub use state::{Individual, State};
pub use time::Tick;
