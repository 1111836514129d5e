//! Epidemiological state shared across every crate.
//!
//! `State` is closed: there is no fifth "unknown" value, so renderers and
//! counters match exhaustively and never need a fallback branch.

use std::fmt;
use std::str::FromStr;

use crate::EpiError;

/// The epidemiological state of one individual.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum State {
    /// Can be infected by an infected neighbor (initial state).
    #[default]
    Susceptible,
    /// Currently infectious.
    Infected,
    /// Immune until immunity wanes.
    Recovered,
    /// Permanently immune.  Absorbing.
    Vaccinated,
}

impl State {
    /// Every state, in the column order used by count tables.
    pub const ALL: [State; 4] = [
        State::Susceptible,
        State::Infected,
        State::Recovered,
        State::Vaccinated,
    ];

    /// Lowercase label, used as CSV column names and for parsing.
    pub fn label(self) -> &'static str {
        match self {
            State::Susceptible => "susceptible",
            State::Infected    => "infected",
            State::Recovered   => "recovered",
            State::Vaccinated  => "vaccinated",
        }
    }

    /// Fixed pastel display color as `[r, g, b]`.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            State::Susceptible => [255, 239, 186], // yellow
            State::Infected    => [255, 182, 193], // pink
            State::Recovered   => [173, 216, 230], // blue
            State::Vaccinated  => [152, 251, 152], // green
        }
    }

    /// Single ASCII character for terminal previews.
    pub fn glyph(self) -> char {
        match self {
            State::Susceptible => '.',
            State::Infected    => '#',
            State::Recovered   => 'o',
            State::Vaccinated  => '+',
        }
    }

    /// `true` if no transition ever leaves this state.
    #[inline]
    pub fn is_absorbing(self) -> bool {
        matches!(self, State::Vaccinated)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for State {
    type Err = EpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EpiError::UnknownState(s.to_owned()))
    }
}

// ── Individual ────────────────────────────────────────────────────────────────

/// One member of the population.  Holds its state and nothing else.
///
/// Mutated only by the grid's update rule or by explicit seeding.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    state: State,
}

impl Individual {
    /// A new individual, `Susceptible`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Unconditional overwrite.
    #[inline]
    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }
}

impl From<State> for Individual {
    fn from(state: State) -> Self {
        Self { state }
    }
}
