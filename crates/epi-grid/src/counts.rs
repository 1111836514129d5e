//! Aggregate state counts and per-step transition tallies.

use epi_core::{State, Tick};

/// How many individuals are in each state.  Computed on demand by scanning
/// the grid; never stored inside it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counts {
    pub susceptible: usize,
    pub infected:    usize,
    pub recovered:   usize,
    pub vaccinated:  usize,
}

impl Counts {
    /// Add one individual in `state`.
    #[inline]
    pub fn record(&mut self, state: State) {
        match state {
            State::Susceptible => self.susceptible += 1,
            State::Infected    => self.infected += 1,
            State::Recovered   => self.recovered += 1,
            State::Vaccinated  => self.vaccinated += 1,
        }
    }

    pub fn get(&self, state: State) -> usize {
        match state {
            State::Susceptible => self.susceptible,
            State::Infected    => self.infected,
            State::Recovered   => self.recovered,
            State::Vaccinated  => self.vaccinated,
        }
    }

    /// Sum over all four states.  Equals n² for any grid snapshot.
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered + self.vaccinated
    }

    /// Share of the population in `state`; `0.0` for an empty tally.
    pub fn fraction(&self, state: State) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(state) as f64 / total as f64,
        }
    }
}

impl FromIterator<State> for Counts {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut counts = Counts::default();
        for state in iter {
            counts.record(state);
        }
        counts
    }
}

// ── StepReport ────────────────────────────────────────────────────────────────

/// Transitions applied by one call to `step()`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    /// The tick the grid now reflects.
    pub tick:             Tick,
    /// Whether the hesitancy gate allowed vaccinations this tick.
    pub vaccination_open: bool,
    /// Susceptible → Infected.
    pub new_infections:   usize,
    /// Infected → Recovered.
    pub recoveries:       usize,
    /// Recovered → Susceptible.
    pub relapses:         usize,
    /// Susceptible or Recovered → Vaccinated.
    pub vaccinations:     usize,
}

impl StepReport {
    pub(crate) fn new(tick: Tick, vaccination_open: bool) -> Self {
        Self { tick, vaccination_open, ..Default::default() }
    }

    /// Tally one cell's change from `from` to `to`.  No-ops are ignored.
    #[inline]
    pub(crate) fn record(&mut self, from: State, to: State) {
        match (from, to) {
            (State::Susceptible, State::Infected)    => self.new_infections += 1,
            (State::Infected,    State::Recovered)   => self.recoveries += 1,
            (State::Recovered,   State::Susceptible) => self.relapses += 1,
            (_,                  State::Vaccinated) if from != to => self.vaccinations += 1,
            _ => {}
        }
    }

    /// Fold another partial tally (e.g. one row) into `self`.
    pub(crate) fn merge(mut self, other: StepReport) -> StepReport {
        self.new_infections += other.new_infections;
        self.recoveries     += other.recoveries;
        self.relapses       += other.relapses;
        self.vaccinations   += other.vaccinations;
        self
    }

    /// Total number of cells that changed state.
    pub fn changed(&self) -> usize {
        self.new_infections + self.recoveries + self.relapses + self.vaccinations
    }
}
