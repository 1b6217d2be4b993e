//! # NuFast NSI
//!
//! Three-flavor neutrino matter Hamiltonian with Non-Standard Interactions.
//!
//! NSI are extra effective neutrino-matter couplings ε_αβ that modify the
//! Standard Model matter potential. This crate stores those couplings,
//! tracks whether any change requires a new diagonalization, and assembles
//! the Hamiltonian handed to an external eigen-solver.
//!
//! ## Features
//!
//! - **Coupling store**: validated, index-symmetric access to ε_αβ
//! - **Change detection**: setters report whether anything actually changed
//! - **Lazy rebuild**: [`NsiEngine::refresh`] skips work when the cache is valid
//! - **Antineutrinos**: per-cell sign flip and conjugation
//!
//! ## Quick Start
//!
//! ```rust
//! use nufast_nsi::{CacheValidity, Hermitian3, NsiEngine};
//!
//! let mut engine = NsiEngine::new();
//! engine.set_energy(2.5);
//! engine.set_eps_etau(0.1, 0.5);
//!
//! let mut calls = 0;
//! let mut solver = |_ham: &Hermitian3| calls += 1;
//! assert!(engine.refresh(&mut solver));
//! assert_eq!(engine.cache(), CacheValidity::Valid);
//!
//! // Same value again: nothing to recompute.
//! engine.set_eps_etau(0.1, 0.5);
//! assert!(!engine.refresh(&mut solver));
//! assert_eq!(calls, 1);
//! ```
//!
//! ## Conventions
//!
//! - Flavor indices: 0 = e, 1 = μ, 2 = τ.
//! - The stored electron diagonal is ε_ee + 1 (see [`nsi`]).
//! - Energy in GeV, density in g/cm³, Hamiltonian in eV.

// Allow physics naming conventions (standard in neutrino oscillation literature)
#![allow(non_snake_case)]

pub mod cache;
pub mod engine;
pub mod error;
pub mod flavor;
pub mod hamiltonian;
pub mod nsi;
pub mod path;
pub mod vacuum;

#[cfg(test)]
mod test_log;

pub use cache::{CacheValidity, Change};
pub use engine::{EngineConfig, Eigensolver, NsiEngine};
pub use error::{NsiError, Result};
pub use flavor::{Flavor, NUM_NUS};
pub use hamiltonian::{assemble, hermitian_full, Hermitian3, Mode};
pub use nsi::{NsiCouplings, NsiParameterSet};
pub use path::MatterPath;
pub use vacuum::MixingParameters;

/// GeV → eV
pub const GEV_TO_EV: f64 = 1.0e9;

/// 1/km expressed in eV (1 / ħc with ħc = 1.973269788e-10 eV·km)
pub const KM_TO_EV: f64 = 1.0 / 1.973269788e-10;

/// Avogadro's number in mol⁻¹
pub const AVOGADRO: f64 = 6.022140857e23;

/// Unit conversion mol/(GeV²·cm³) → eV
///
/// Turns `G_F · ρ · Z/A` (with G_F in GeV⁻², ρ in g/cm³) into eV.
pub const K2: f64 = 1e-3 * AVOGADRO / (KM_TO_EV * KM_TO_EV * KM_TO_EV);

/// Fermi coupling G_F / (ħc)³ in GeV⁻²
pub const FERMI_COUPLING: f64 = 1.1663787e-5;

/// Matter potential coefficient: V = √2 G_F N_e
///
/// `V [eV] = MATTER_POTENTIAL_COEFF · ρ [g/cm³] · Z/A`, approximately
/// 7.63 × 10⁻¹⁴ eV per g/cm³.
pub const MATTER_POTENTIAL_COEFF: f64 = K2 * core::f64::consts::SQRT_2 * FERMI_COUPLING;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matter_coefficient_value() {
        assert_relative_eq!(K2, 4.6271e-9, max_relative = 1e-4);
        assert_relative_eq!(MATTER_POTENTIAL_COEFF, 7.6324e-14, max_relative = 1e-4);
    }
}
