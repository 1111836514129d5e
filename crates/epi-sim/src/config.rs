//! Run configuration.

use epi_core::EpidemicParams;

use crate::Seeding;

/// Everything needed to build and drive one run.
///
/// Typically built with `..SimConfig::default()`, or deserialized from JSON
/// with the `serde` feature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Grid side length `n`; the population is `n²`.
    pub side: usize,

    /// Steps to run after tick 0.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub params: EpidemicParams,

    /// Initial infections placed before tick 0 is reported.
    pub seeding: Seeding,

    /// End the run early once no infected individual remains.
    pub stop_on_extinction: bool,

    /// Emit an `info!` progress line every N ticks.  0 disables it.
    pub progress_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            side:                    100,
            total_ticks:             1_000,
            seed:                    0,
            params:                  EpidemicParams::default(),
            seeding:                 Seeding::Block { rows: 25..75, cols: 25..75, probability: 0.75 },
            stop_on_extinction:      false,
            progress_interval_ticks: 100,
        }
    }
}
