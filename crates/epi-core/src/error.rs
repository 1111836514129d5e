//! Model error type.
//!
//! Every variant is a caller bug surfaced at the call site: nothing here is
//! transient or worth retrying.  Sub-crates wrap `EpiError` as one variant of
//! their own error enums.

use thiserror::Error;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    #[error("grid side must be positive, got {0}")]
    InvalidSize(usize),

    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    IndexOutOfBounds { row: usize, col: usize, size: usize },

    #[error("rate `{name}` must be a finite value in [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("unknown epidemiological state {0:?}")]
    UnknownState(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;
