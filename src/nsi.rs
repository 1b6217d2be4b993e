//! NSI coupling-parameter store.
//!
//! Holds the upper triangle of the 3×3 complex coupling matrix ε. Only
//! `i <= j` entries are meaningful; consumers read the matrix as Hermitian.
//!
//! # Electron-diagonal offset
//!
//! The stored `(e, e)` entry is **ε_ee + 1**, not ε_ee. The Standard Model
//! charged-current potential rides on the same cell, so the zero-coupling
//! state already carries a 1 there and [`NsiCouplings::eps`] returns that
//! offset value unchanged:
//!
//! ```rust
//! use nufast_nsi::NsiCouplings;
//! use num_complex::Complex64;
//!
//! let mut eps = NsiCouplings::new();
//! eps.set_eps(0, 0, 0.3, 0.0).unwrap();
//! assert_eq!(eps.eps(0, 0), Complex64::new(1.3, 0.0));
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::cache::Change;
use crate::error::Result;
use crate::flavor::{normalize_pair, ordered, Flavor, NUM_NUS};
use crate::hamiltonian::Hermitian3;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// The nine real inputs that fully describe the NSI couplings.
///
/// Diagonal entries are real. Off-diagonal entries are given as a magnitude
/// and a phase in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NsiParameterSet {
    pub eps_ee: f64,
    pub eps_emu: f64,
    pub eps_etau: f64,
    pub eps_mumu: f64,
    pub eps_mutau: f64,
    pub eps_tautau: f64,
    pub delta_emu: f64,
    pub delta_etau: f64,
    pub delta_mutau: f64,
}

/// Upper-triangular NSI coupling matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct NsiCouplings {
    eps: Hermitian3,
}

impl Default for NsiCouplings {
    fn default() -> Self {
        Self::new()
    }
}

impl NsiCouplings {
    /// Zero-coupling state: every entry zero except the electron diagonal,
    /// which holds the offset value 1.
    pub fn new() -> Self {
        let mut eps = [[ZERO; NUM_NUS]; NUM_NUS];
        eps[0][0] = Complex64::new(1.0, 0.0);
        Self { eps }
    }

    /// Build the couplings from a full parameter set.
    pub fn from_parameters(params: &NsiParameterSet) -> Self {
        let mut couplings = Self::new();
        couplings.set_nsi(params);
        couplings
    }

    /// Return to the zero-coupling state.
    pub fn reset(&mut self) -> Change {
        let fresh = Self::new();
        let change = Change::between(&self.eps, &fresh.eps);
        *self = fresh;
        change
    }

    /// Raw upper-triangular storage. Lower-triangle cells are always zero
    /// and carry no meaning.
    #[inline]
    pub fn matrix(&self) -> &Hermitian3 {
        &self.eps
    }

    /// Set one NSI parameter by raw flavor indices.
    ///
    /// An inverted pair is swapped. An invalid pair is rejected without
    /// touching the store. For diagonal entries `phase` is ignored; the
    /// electron diagonal stores `magnitude + 1`.
    ///
    /// Returns whether the stored value changed (exact comparison).
    pub fn set_eps(&mut self, i: i32, j: i32, magnitude: f64, phase: f64) -> Result<Change> {
        match normalize_pair(i, j) {
            Ok((fi, fj)) => Ok(self.set_pair(fi, fj, magnitude, phase)),
            Err(err) => {
                log::warn!("{err}. Doing nothing.");
                Err(err)
            }
        }
    }

    /// Set one NSI parameter by flavor. Inverted pairs are swapped with a warning.
    pub fn set_pair(&mut self, a: Flavor, b: Flavor, magnitude: f64, phase: f64) -> Change {
        let (a, b) = ordered(a, b);
        let value = if a != b {
            magnitude * Complex64::new(phase.cos(), phase.sin())
        } else if a == Flavor::Electron {
            Complex64::new(magnitude + 1.0, 0.0)
        } else {
            Complex64::new(magnitude, 0.0)
        };

        let cell = &mut self.eps[a.index()][b.index()];
        let change = Change::between(&*cell, &value);
        *cell = value;
        change
    }

    /// Stored value of one parameter, offset included.
    ///
    /// Returns zero for an invalid pair.
    pub fn eps(&self, i: i32, j: i32) -> Complex64 {
        self.try_eps(i, j).unwrap_or_else(|err| {
            log::warn!("{err}. Returning 0.");
            ZERO
        })
    }

    /// Checked variant of [`eps`](Self::eps).
    pub fn try_eps(&self, i: i32, j: i32) -> Result<Complex64> {
        let (a, b) = normalize_pair(i, j)?;
        Ok(self.pair(a, b))
    }

    /// Stored value by flavor, in either order.
    #[inline]
    pub fn pair(&self, a: Flavor, b: Flavor) -> Complex64 {
        let (a, b) = ordered(a, b);
        self.eps[a.index()][b.index()]
    }

    /// Set all NSI parameters at once: diagonal first, then off-diagonal in
    /// ascending order.
    #[allow(clippy::too_many_arguments)]
    pub fn set_all(
        &mut self,
        eps_ee: f64,
        eps_emu: f64,
        eps_etau: f64,
        eps_mumu: f64,
        eps_mutau: f64,
        eps_tautau: f64,
        delta_emu: f64,
        delta_etau: f64,
        delta_mutau: f64,
    ) -> Change {
        use Flavor::*;

        [
            self.set_pair(Electron, Electron, eps_ee, 0.0),
            self.set_pair(Muon, Muon, eps_mumu, 0.0),
            self.set_pair(Tau, Tau, eps_tautau, 0.0),
            self.set_pair(Electron, Muon, eps_emu, delta_emu),
            self.set_pair(Electron, Tau, eps_etau, delta_etau),
            self.set_pair(Muon, Tau, eps_mutau, delta_mutau),
        ]
        .into_iter()
        .fold(Change::Unchanged, Change::merge)
    }

    /// [`set_all`](Self::set_all) from a parameter set.
    pub fn set_nsi(&mut self, p: &NsiParameterSet) -> Change {
        self.set_all(
            p.eps_ee,
            p.eps_emu,
            p.eps_etau,
            p.eps_mumu,
            p.eps_mutau,
            p.eps_tautau,
            p.delta_emu,
            p.delta_etau,
            p.delta_mutau,
        )
    }

    pub fn set_eps_ee(&mut self, a: f64) -> Change {
        self.set_pair(Flavor::Electron, Flavor::Electron, a, 0.0)
    }

    pub fn set_eps_mumu(&mut self, a: f64) -> Change {
        self.set_pair(Flavor::Muon, Flavor::Muon, a, 0.0)
    }

    pub fn set_eps_tautau(&mut self, a: f64) -> Change {
        self.set_pair(Flavor::Tau, Flavor::Tau, a, 0.0)
    }

    pub fn set_eps_emu(&mut self, a: f64, phi: f64) -> Change {
        self.set_pair(Flavor::Electron, Flavor::Muon, a, phi)
    }

    pub fn set_eps_etau(&mut self, a: f64, phi: f64) -> Change {
        self.set_pair(Flavor::Electron, Flavor::Tau, a, phi)
    }

    pub fn set_eps_mutau(&mut self, a: f64, phi: f64) -> Change {
        self.set_pair(Flavor::Muon, Flavor::Tau, a, phi)
    }
}
