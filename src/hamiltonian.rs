//! Matter Hamiltonian assembly.
//!
//! The vacuum mass-squared matrix is divided by 2E to obtain the vacuum
//! Hamiltonian in eV, then the matter potential weighted by the NSI
//! couplings is added to each flavor pair. For antineutrinos the matter
//! term flips sign and the whole cell is conjugated.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::flavor::NUM_NUS;
use crate::nsi::NsiCouplings;
use crate::path::MatterPath;
use crate::GEV_TO_EV;

/// 3×3 complex matrix. Hermitian matrices keep only the upper triangle.
pub type Hermitian3 = [[Complex64; NUM_NUS]; NUM_NUS];

/// Neutrino or antineutrino propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Neutrino,
    Antineutrino,
}

impl Mode {
    #[inline]
    pub fn is_nubar(self) -> bool {
        matches!(self, Mode::Antineutrino)
    }
}

/// Build the matter Hamiltonian in eV into `ham`.
///
/// * `vacuum` - mass-squared matrix in eV² (upper triangle)
/// * `energy` - neutrino energy in GeV
///
/// Per cell `i <= j`:
/// - neutrino: `Hms/2E + V·ε`
/// - antineutrino: `conj(Hms/2E - V·ε)`
///
/// Lower-triangle cells of `ham` are not written.
pub fn assemble(
    vacuum: &Hermitian3,
    energy: f64,
    path: &MatterPath,
    couplings: &NsiCouplings,
    mode: Mode,
    ham: &mut Hermitian3,
) {
    let lv = 2.0 * GEV_TO_EV * energy; // 2E in eV
    let v = path.matter_potential(); // eV
    let eps = couplings.matrix();

    for i in 0..NUM_NUS {
        for j in i..NUM_NUS {
            ham[i][j] = match mode {
                Mode::Neutrino => vacuum[i][j] / lv + v * eps[i][j],
                Mode::Antineutrino => (vacuum[i][j] / lv - v * eps[i][j]).conj(),
            };
        }
    }
}

/// Fill the lower triangle from the upper one by conjugation.
pub fn hermitian_full(upper: &Hermitian3) -> Hermitian3 {
    let mut full = *upper;
    for i in 0..NUM_NUS {
        for j in 0..i {
            full[i][j] = upper[j][i].conj();
        }
    }
    full
}
