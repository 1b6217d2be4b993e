//! Error types for NSI parameter access.

use thiserror::Error;

/// Recoverable errors reported by the NSI parameter store.
///
/// None of these abort a computation: a rejected write leaves the store in
/// its last-good state, and a rejected read falls back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NsiError {
    /// Flavor pair outside `[0, 2]` (or `j < i` after normalization).
    #[error("Eps_{i}{j} not valid for 3 neutrinos")]
    InvalidFlavorPair { i: i32, j: i32 },

    /// A single index that does not name a flavor.
    #[error("invalid flavor index {0}, expected 0 (e), 1 (mu) or 2 (tau)")]
    InvalidFlavor(i64),
}

pub type Result<T> = std::result::Result<T, NsiError>;
