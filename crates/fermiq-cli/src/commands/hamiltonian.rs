//! Hamiltonian command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use fermiq_chem::fermion::DEFAULT_CUTOFF;
use fermiq_chem::{SpinMode, jordan_wigner, molecular_hamiltonian};

use super::common::load_integrals;

/// Execute the hamiltonian command.
pub fn execute(input: &Path, spin_mode: SpinMode, show: usize) -> Result<()> {
    println!(
        "{} Building qubit Hamiltonian from {}",
        style("→").cyan().bold(),
        style(input.display()).green()
    );
    let ints = load_integrals(input)?;

    let fermionic = molecular_hamiltonian(&ints, spin_mode, DEFAULT_CUTOFF);
    println!(
        "  Fermionic: {} terms on {} modes",
        fermionic.n_terms(),
        spin_mode.n_modes(ints.n_orb)
    );

    let qubit = jordan_wigner(&fermionic);
    println!(
        "{} Jordan–Wigner: {} Pauli terms on {} qubits",
        style("✓").green().bold(),
        style(qubit.n_terms()).yellow(),
        qubit.n_qubits()
    );

    for (pauli, coeff) in qubit.iter().take(show) {
        println!(
            "  {:>+14.8} {:>+14.8}i  {}",
            coeff.re,
            coeff.im,
            style(pauli).cyan()
        );
    }
    if qubit.n_terms() > show {
        println!("  ... and {} more terms", qubit.n_terms() - show);
    }

    Ok(())
}
