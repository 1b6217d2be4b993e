//! Flavor eigenstates and flavor-pair normalization.
//!
//! The numbering `0 = e, 1 = μ, 2 = τ` is part of the serialized parameter
//! format and must never change.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NsiError, Result};

/// Number of neutrino flavors handled by this crate.
pub const NUM_NUS: usize = 3;

/// Neutrino flavor eigenstate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Flavor {
    Electron = 0,
    Muon = 1,
    Tau = 2,
}

impl Flavor {
    pub const ALL: [Flavor; NUM_NUS] = [Flavor::Electron, Flavor::Muon, Flavor::Tau];

    /// Matrix index of this flavor.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short label used in parameter names (`e`, `mu`, `tau`).
    pub const fn label(self) -> &'static str {
        match self {
            Flavor::Electron => "e",
            Flavor::Muon => "mu",
            Flavor::Tau => "tau",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for Flavor {
    type Error = NsiError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Flavor::Electron),
            1 => Ok(Flavor::Muon),
            2 => Ok(Flavor::Tau),
            other => Err(NsiError::InvalidFlavor(other)),
        }
    }
}

impl TryFrom<u8> for Flavor {
    type Error = NsiError;

    fn try_from(value: u8) -> Result<Self> {
        Flavor::try_from(i64::from(value))
    }
}

impl From<Flavor> for u8 {
    fn from(flavor: Flavor) -> u8 {
        flavor as u8
    }
}

/// Order a typed pair onto the upper triangle, warning on a swap.
pub(crate) fn ordered(a: Flavor, b: Flavor) -> (Flavor, Flavor) {
    if a > b {
        log::warn!("first flavor should not exceed the second; using Eps_{b}{a}");
        (b, a)
    } else {
        (a, b)
    }
}

/// Normalize a raw `(i, j)` pair onto the upper triangle.
///
/// An inverted pair is swapped with a warning. The pair is rejected if
/// either index falls outside `[0, 2]` after the swap.
pub fn normalize_pair(i: i32, j: i32) -> Result<(Flavor, Flavor)> {
    let (mut i, mut j) = (i, j);
    if i > j {
        log::warn!("first flavor index should not exceed the second; using Eps_{j}{i}");
        core::mem::swap(&mut i, &mut j);
    }
    // j < i cannot survive the swap above, but the pair is checked as a whole.
    if i < 0 || i > 2 || j < i || j > 2 {
        return Err(NsiError::InvalidFlavorPair { i, j });
    }
    Ok((Flavor::try_from(i64::from(i))?, Flavor::try_from(i64::from(j))?))
}
