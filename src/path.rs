//! Constant-density matter path.

use serde::{Deserialize, Serialize};

use crate::MATTER_POTENTIAL_COEFF;

/// A single constant-density segment of the neutrino path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatterPath {
    /// Path length in km
    pub length_km: f64,
    /// Matter density ρ in g/cm³
    pub density: f64,
    /// Electron-to-nucleon ratio Z/A (0.5 for Earth crust)
    pub zoa: f64,
}

impl Default for MatterPath {
    fn default() -> Self {
        Self::standard()
    }
}

impl MatterPath {
    pub fn new(length_km: f64, density: f64, zoa: f64) -> Self {
        Self { length_km, density, zoa }
    }

    /// 1000 km through Earth crust (ρ = 2.6 g/cm³, Z/A = 0.5).
    pub fn standard() -> Self {
        Self::new(1000.0, 2.6, 0.5)
    }

    /// Charged-current matter potential √2 G_F N_e in eV.
    #[inline]
    pub fn matter_potential(&self) -> f64 {
        MATTER_POTENTIAL_COEFF * self.density * self.zoa
    }
}
