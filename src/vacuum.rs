//! Vacuum term: standard mixing parameters and the flavor-basis
//! mass-squared matrix.

use core::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::flavor::NUM_NUS;
use crate::hamiltonian::Hermitian3;

/// Standard three-flavor mixing parameters.
///
/// All angles are specified as sin²θ, CP phase in radians.
/// Mass splittings in eV².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixingParameters {
    /// sin²θ₁₂ (solar mixing angle)
    pub s12sq: f64,
    /// sin²θ₁₃ (reactor mixing angle)
    pub s13sq: f64,
    /// sin²θ₂₃ (atmospheric mixing angle)
    pub s23sq: f64,
    /// CP-violating phase δ in radians
    pub delta: f64,
    /// Δm²₂₁ in eV² (solar mass splitting, always positive)
    pub Dmsq21: f64,
    /// Δm²₃₁ in eV² (atmospheric mass splitting, positive for NO, negative for IO)
    pub Dmsq31: f64,
}

impl Default for MixingParameters {
    fn default() -> Self {
        Self::nufit52_no()
    }
}

impl MixingParameters {
    /// NuFit 5.2 best-fit values (Normal Ordering).
    pub fn nufit52_no() -> Self {
        Self {
            s12sq: 0.307,
            s13sq: 0.02203,
            s23sq: 0.546,
            delta: 1.36 * PI,
            Dmsq21: 7.42e-5,
            Dmsq31: 2.517e-3,
        }
    }

    /// NuFit 5.2 best-fit values (Inverted Ordering).
    pub fn nufit52_io() -> Self {
        Self {
            s12sq: 0.307,
            s13sq: 0.02219,
            s23sq: 0.539,
            delta: 1.56 * PI,
            Dmsq21: 7.42e-5,
            Dmsq31: -2.498e-3,
        }
    }

    /// PMNS matrix in the standard parameterization, `U[flavor][mass]`.
    pub fn pmns(&self) -> Hermitian3 {
        let s12 = self.s12sq.sqrt();
        let s13 = self.s13sq.sqrt();
        let s23 = self.s23sq.sqrt();
        let c12 = (1.0 - self.s12sq).sqrt();
        let c13 = (1.0 - self.s13sq).sqrt();
        let c23 = (1.0 - self.s23sq).sqrt();

        let eid = Complex64::from_polar(1.0, self.delta);
        let s13e = s13 * eid;

        let c = |x: f64| Complex64::new(x, 0.0);

        [
            [c(c12 * c13), c(s12 * c13), s13e.conj()],
            [
                -s12 * c23 - c12 * s23 * s13e,
                c12 * c23 - s12 * s23 * s13e,
                c(s23 * c13),
            ],
            [
                s12 * s23 - c12 * c23 * s13e,
                -c12 * s23 - s12 * c23 * s13e,
                c(c23 * c13),
            ],
        ]
    }

    /// Flavor-basis mass-squared matrix `U · diag(0, Δm²₂₁, Δm²₃₁) · U†`
    /// in eV². Only the upper triangle is filled.
    pub fn mass_squared_matrix(&self) -> Hermitian3 {
        let u = self.pmns();
        let dm = [0.0, self.Dmsq21, self.Dmsq31];

        let mut hms = [[Complex64::new(0.0, 0.0); NUM_NUS]; NUM_NUS];
        for i in 0..NUM_NUS {
            for j in i..NUM_NUS {
                hms[i][j] = (0..NUM_NUS).map(|k| u[i][k] * dm[k] * u[j][k].conj()).sum();
            }
            // Diagonal is real up to rounding.
            hms[i][i].im = 0.0;
        }
        hms
    }
}
