//! Epidemiological rate parameters.
//!
//! All rates are per-tick probabilities.  They are validated once, when the
//! grid is built; the transition rule assumes they hold afterwards.

use crate::{EpiError, EpiResult, Tick};

/// Rates and vaccine timing governing the transition rule.
///
/// Typically constructed with `..Default::default()` and a handful of
/// overrides, or deserialized from JSON with the `serde` feature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EpidemicParams {
    /// Infection probability contributed by each infected neighbor.
    pub infection_rate: f64,

    /// Infected → Recovered probability.
    pub recovery_rate: f64,

    /// Recovered → Susceptible probability (waning immunity).
    pub relapse_rate: f64,

    /// Background vaccination probability once the vaccine is available.
    pub vaccination_rate: f64,

    /// Fraction of the population that will never vaccinate.  New
    /// vaccinations stop once `1 - vaccine_hesitancy` of the grid is
    /// vaccinated.
    pub vaccine_hesitancy: f64,

    /// First tick at which the vaccine exists.
    pub vaccine_tick: Tick,
}

impl Default for EpidemicParams {
    fn default() -> Self {
        Self {
            infection_rate:    0.20,
            recovery_rate:     1.0 / 20.0,
            relapse_rate:      1.0 / 200.0,
            vaccination_rate:  1.0 / 1000.0,
            vaccine_hesitancy: 0.2,
            vaccine_tick:      Tick(200),
        }
    }
}

impl EpidemicParams {
    /// Parameters with every rate zero and the vaccine never available.
    /// Nothing changes under these; tests enable one mechanism at a time.
    pub fn frozen() -> Self {
        Self {
            infection_rate:    0.0,
            recovery_rate:     0.0,
            relapse_rate:      0.0,
            vaccination_rate:  0.0,
            vaccine_hesitancy: 0.0,
            vaccine_tick:      Tick(u64::MAX),
        }
    }

    /// Check every rate is finite and within `[0, 1]`.
    pub fn validate(&self) -> EpiResult<()> {
        let rates = [
            ("infection_rate",    self.infection_rate),
            ("recovery_rate",     self.recovery_rate),
            ("relapse_rate",      self.relapse_rate),
            ("vaccination_rate",  self.vaccination_rate),
            ("vaccine_hesitancy", self.vaccine_hesitancy),
        ];
        for (name, value) in rates {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(EpiError::InvalidRate { name, value });
            }
        }
        Ok(())
    }

    /// Largest vaccinated fraction at which new vaccinations still happen
    /// (exclusive).
    #[inline]
    pub fn vaccination_ceiling(&self) -> f64 {
        1.0 - self.vaccine_hesitancy
    }
}
