//! NuFast NSI CLI - Print matter Hamiltonians with and without NSI
//!
//! Run with: `cargo run --release`

use nufast_nsi::{hermitian_full, EngineConfig, Hermitian3, MatterPath, Mode, NsiEngine, NsiParameterSet};
use std::f64::consts::PI;

fn main() {
    println!("NuFast NSI - Matter Hamiltonian with Non-Standard Interactions");
    println!("==============================================================\n");

    // DUNE-like parameters
    let config = EngineConfig {
        path: MatterPath::new(1300.0, 2.848, 0.5),
        energy: 2.5,
        ..EngineConfig::default()
    };

    let nsi = NsiParameterSet {
        eps_ee: 0.5,
        eps_etau: 0.2,
        delta_etau: -0.5 * PI,
        ..NsiParameterSet::default()
    };

    println!("Parameters (DUNE-like, Normal Ordering):");
    println!("  Baseline: {} km", config.path.length_km);
    println!("  Energy: {} GeV", config.energy);
    println!("  Density: {} g/cm³", config.path.density);
    println!("  V_CC: {:.4e} eV", config.path.matter_potential());
    println!();

    let mut engine = NsiEngine::from_config(&config);

    for mode in [Mode::Neutrino, Mode::Antineutrino] {
        engine.set_mode(mode);

        engine.reset_nsi();
        engine.refresh(&mut |ham: &Hermitian3| {
            println!("{mode:?}, Standard Model matter (eV):");
            print_matrix(ham);
        });

        engine.set_nsi(&nsi);
        engine.refresh(&mut |ham: &Hermitian3| {
            println!("\n{mode:?}, eps_ee = {}, |eps_etau| = {} (eV):", nsi.eps_ee, nsi.eps_etau);
            print_matrix(ham);
        });
        println!();
    }
}

fn print_matrix(ham: &Hermitian3) {
    let full = hermitian_full(ham);
    println!("               e                        μ                        τ");
    let labels = ['e', 'μ', 'τ'];
    for (i, row) in full.iter().enumerate() {
        print!("  {} ", labels[i]);
        for h in row {
            print!(" ({:>+10.3e},{:>+10.3e})", h.re, h.im);
        }
        println!();
    }
}
