//! Owner of the NSI couplings, the cache flag, and the Hamiltonian buffer.
//!
//! Every setter folds its [`Change`] event into the engine's
//! [`CacheValidity`]. [`NsiEngine::refresh`] rebuilds the Hamiltonian and
//! hands it to the eigen-solver only when that flag is not valid.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheValidity, Change};
use crate::error::Result;
use crate::flavor::{Flavor, NUM_NUS};
use crate::hamiltonian::{assemble, Hermitian3, Mode};
use crate::nsi::{NsiCouplings, NsiParameterSet};
use crate::path::MatterPath;
use crate::vacuum::MixingParameters;

/// External eigen-decomposition of the assembled Hamiltonian.
///
/// Only the upper triangle of `ham` is meaningful.
pub trait Eigensolver {
    fn diagonalize(&mut self, ham: &Hermitian3);
}

impl<F: FnMut(&Hermitian3)> Eigensolver for F {
    fn diagonalize(&mut self, ham: &Hermitian3) {
        self(ham)
    }
}

/// Serializable engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mixing: MixingParameters,
    pub path: MatterPath,
    pub nsi: NsiParameterSet,
    /// Neutrino energy E in GeV
    pub energy: f64,
    pub mode: Mode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mixing: MixingParameters::default(),
            path: MatterPath::standard(),
            nsi: NsiParameterSet::default(),
            energy: 1.0,
            mode: Mode::Neutrino,
        }
    }
}

/// Three-flavor propagation state with NSI.
///
/// Holds the base inputs (mixing, energy, path, mode), the NSI couplings,
/// the Hamiltonian buffer and the eigensystem cache flag. Setters compare
/// old and new values exactly; only a real change marks the cache stale.
///
/// Energy in GeV, density in g/cm³, Hamiltonian in eV.
#[derive(Debug, Clone)]
pub struct NsiEngine {
    mixing: MixingParameters,
    hms: Hermitian3,
    energy: f64,
    path: MatterPath,
    mode: Mode,
    eps: NsiCouplings,
    ham: Hermitian3,
    cache: CacheValidity,
}

impl Default for NsiEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl NsiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            mixing: config.mixing,
            hms: config.mixing.mass_squared_matrix(),
            energy: config.energy,
            path: config.path,
            mode: config.mode,
            eps: NsiCouplings::from_parameters(&config.nsi),
            ham: [[Complex64::new(0.0, 0.0); NUM_NUS]; NUM_NUS],
            cache: CacheValidity::Uninitialized,
        }
    }

    #[inline]
    pub fn cache(&self) -> CacheValidity {
        self.cache
    }

    #[inline]
    fn track(&mut self, change: Change) -> Change {
        self.cache.update(change);
        change
    }

    // --- base-engine inputs --------------------------------------------

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Set the neutrino energy in GeV.
    pub fn set_energy(&mut self, energy: f64) -> Change {
        let change = Change::between(&self.energy, &energy);
        self.energy = energy;
        self.track(change)
    }

    pub fn path(&self) -> &MatterPath {
        &self.path
    }

    pub fn set_path(&mut self, path: MatterPath) -> Change {
        // Length does not enter the Hamiltonian.
        let change = Change::between(&self.path.density, &path.density)
            .merge(Change::between(&self.path.zoa, &path.zoa));
        self.path = path;
        self.track(change)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) -> Change {
        let change = Change::between(&self.mode, &mode);
        self.mode = mode;
        self.track(change)
    }

    pub fn mixing(&self) -> &MixingParameters {
        &self.mixing
    }

    /// Replace the mixing parameters and recompute the vacuum term.
    pub fn set_mixing(&mut self, mixing: MixingParameters) -> Change {
        let change = Change::between(&self.mixing, &mixing);
        if change.is_changed() {
            self.mixing = mixing;
            self.hms = mixing.mass_squared_matrix();
        }
        self.track(change)
    }

    /// Flavor-basis mass-squared matrix in eV².
    pub fn vacuum_term(&self) -> &Hermitian3 {
        &self.hms
    }

    // --- NSI parameters -------------------------------------------------

    pub fn couplings(&self) -> &NsiCouplings {
        &self.eps
    }

    /// See [`NsiCouplings::set_eps`]. Invalid pairs leave the cache alone.
    pub fn set_eps(&mut self, i: i32, j: i32, magnitude: f64, phase: f64) -> Result<Change> {
        let change = self.eps.set_eps(i, j, magnitude, phase)?;
        Ok(self.track(change))
    }

    pub fn set_pair(&mut self, a: Flavor, b: Flavor, magnitude: f64, phase: f64) -> Change {
        let change = self.eps.set_pair(a, b, magnitude, phase);
        self.track(change)
    }

    pub fn eps(&self, i: i32, j: i32) -> Complex64 {
        self.eps.eps(i, j)
    }

    pub fn set_nsi(&mut self, params: &NsiParameterSet) -> Change {
        let change = self.eps.set_nsi(params);
        self.track(change)
    }

    pub fn reset_nsi(&mut self) -> Change {
        let change = self.eps.reset();
        self.track(change)
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

    // --- Hamiltonian ------------------------------------------------------

    /// Last assembled Hamiltonian (upper triangle, eV).
    pub fn hamiltonian(&self) -> &Hermitian3 {
        &self.ham
    }

    /// Assemble the Hamiltonian for the current inputs into the buffer.
    /// Does not touch the cache flag.
    pub fn update_ham(&mut self) {
        assemble(&self.hms, self.energy, &self.path, &self.eps, self.mode, &mut self.ham);
    }

    /// Rebuild and re-diagonalize if anything changed since the last call.
    ///
    /// Returns `true` when the solver was invoked.
    pub fn refresh<S: Eigensolver + ?Sized>(&mut self, solver: &mut S) -> bool {
        if self.cache.is_valid() {
            log::debug!("eigensystem cache valid, skipping rebuild");
            return false;
        }
        log::debug!(
            "rebuilding Hamiltonian ({:?}, E = {} GeV, rho = {} g/cm3)",
            self.cache,
            self.energy,
            self.path.density
        );
        self.update_ham();
        solver.diagonalize(&self.ham);
        self.cache = CacheValidity::Valid;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NsiError;
    use proptest::prelude::*;

    #[derive(Default)]
    struct CountingSolver {
        calls: usize,
        last: Option<Hermitian3>,
    }

    impl Eigensolver for CountingSolver {
        fn diagonalize(&mut self, ham: &Hermitian3) {
            self.calls += 1;
            self.last = Some(*ham);
        }
    }

    fn primed() -> (NsiEngine, CountingSolver) {
        let mut engine = NsiEngine::new();
        let mut solver = CountingSolver::default();
        assert!(engine.refresh(&mut solver));
        (engine, solver)
    }

    #[test]
    fn test_first_refresh_always_rebuilds() {
        let engine = NsiEngine::new();
        assert_eq!(engine.cache(), CacheValidity::Uninitialized);
        let (engine, solver) = primed();
        assert_eq!(engine.cache(), CacheValidity::Valid);
        assert_eq!(solver.calls, 1);
        assert_eq!(solver.last.as_ref(), Some(engine.hamiltonian()));
    }

    #[test]
    fn test_unchanged_setter_keeps_cache_valid() {
        let (mut engine, mut solver) = primed();
        assert_eq!(engine.set_eps_ee(0.0), Change::Unchanged);
        assert_eq!(engine.set_eps_mutau(0.0, 1.0), Change::Unchanged);
        assert_eq!(engine.set_energy(1.0), Change::Unchanged);
        assert!(engine.cache().is_valid());
        assert!(!engine.refresh(&mut solver));
        assert_eq!(solver.calls, 1);
    }

    #[test]
    fn test_changed_setter_invalidates_until_refresh() {
        let (mut engine, mut solver) = primed();
        engine.set_eps_emu(0.1, 0.5);
        assert_eq!(engine.cache(), CacheValidity::Stale);
        // Setting the same value again keeps it stale.
        assert_eq!(engine.set_eps_emu(0.1, 0.5), Change::Unchanged);
        assert_eq!(engine.cache(), CacheValidity::Stale);

        assert!(engine.refresh(&mut solver));
        assert_eq!(solver.calls, 2);
        assert!(!engine.refresh(&mut solver));
        assert_eq!(solver.calls, 2);
    }

    #[test]
    fn test_invalid_pair_does_not_touch_cache() {
        let (mut engine, _) = primed();
        assert_eq!(
            engine.set_eps(-1, 5, 1.0, 0.0),
            Err(NsiError::InvalidFlavorPair { i: -1, j: 5 })
        );
        assert!(engine.cache().is_valid());
        assert_eq!(engine.eps(-1, 5), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_base_inputs_invalidate() {
        let (mut engine, mut solver) = primed();
        engine.set_mode(Mode::Antineutrino);
        assert!(!engine.cache().is_valid());
        assert!(engine.refresh(&mut solver));

        let mut path = *engine.path();
        path.length_km = 295.0;
        assert_eq!(engine.set_path(path), Change::Unchanged);
        path.density = 3.0;
        assert_eq!(engine.set_path(path), Change::Changed);
        assert!(engine.refresh(&mut solver));

        assert_eq!(engine.set_mixing(MixingParameters::nufit52_no()), Change::Unchanged);
        assert_eq!(engine.set_mixing(MixingParameters::nufit52_io()), Change::Changed);
        assert_eq!(*engine.vacuum_term(), MixingParameters::nufit52_io().mass_squared_matrix());
    }

    #[test]
    fn test_refreshed_hamiltonian_matches_assembler() {
        let mut engine = NsiEngine::new();
        engine.set_energy(2.5);
        engine.set_nsi(&NsiParameterSet {
            eps_ee: 0.2,
            eps_etau: 0.3,
            delta_etau: -0.4,
            ..Default::default()
        });

        let mut seen = None;
        let mut solver = |ham: &Hermitian3| seen = Some(*ham);
        assert!(engine.refresh(&mut solver));

        let mut expected = [[Complex64::new(0.0, 0.0); 3]; 3];
        assemble(
            engine.vacuum_term(),
            2.5,
            engine.path(),
            engine.couplings(),
            Mode::Neutrino,
            &mut expected,
        );
        assert_eq!(seen, Some(expected));
    }

    #[test]
    fn test_config_from_json() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"energy": 3.0, "mode": "antineutrino", "nsi": {"eps_mumu": 0.1}}"#,
        )
        .unwrap();
        let engine = NsiEngine::from_config(&config);
        assert_eq!(engine.energy(), 3.0);
        assert_eq!(engine.mode(), Mode::Antineutrino);
        assert_eq!(engine.eps(1, 1), Complex64::new(0.1, 0.0));
        assert_eq!(*engine.path(), MatterPath::standard());
    }

    proptest! {
        #[test]
        fn test_repeated_nsi_set_keeps_validity(ee in -1.0f64..1.0, emu in 0.0f64..1.0, d in -3.0f64..3.0) {
            let mut engine = NsiEngine::new();
            let mut solver = CountingSolver::default();
            engine.set_eps_ee(ee);
            engine.set_eps_emu(emu, d);
            engine.refresh(&mut solver);

            engine.set_eps_ee(ee);
            engine.set_eps_emu(emu, d);
            prop_assert!(engine.cache().is_valid());
            prop_assert!(!engine.refresh(&mut solver));
        }
    }
}
