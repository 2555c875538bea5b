//! Integrals command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use fermiq_chem::{IntegralSet, Molecule, RestrictedHartreeFock};

/// Execute the integrals command.
pub fn execute(bond: f64, reference: bool, output: &Path) -> Result<()> {
    let ints = if reference {
        println!(
            "{} Writing tabulated H₂/STO-3G integrals (R = 1.4 bohr)",
            style("→").cyan().bold()
        );
        IntegralSet::h2_reference()
    } else {
        if !(bond.is_finite() && bond > 0.0) {
            anyhow::bail!("Bond length must be positive, got {bond}");
        }
        println!(
            "{} Running RHF/STO-3G for H₂ at {} Å",
            style("→").cyan().bold(),
            style(bond).yellow()
        );
        let outcome = RestrictedHartreeFock::new(Molecule::h2(bond))
            .run()
            .context("SCF failed")?;
        println!(
            "  Converged in {} iterations: E_HF = {} Ha",
            outcome.iterations,
            style(format!("{:.8}", outcome.total_energy)).green()
        );
        println!(
            "  Orbital energies: {}",
            outcome
                .orbital_energies
                .iter()
                .map(|e| format!("{e:.6}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        outcome.mo_integrals()
    };

    ints.save(output)
        .with_context(|| format!("Failed to write integrals to {}", output.display()))?;
    println!(
        "{} {} orbitals, {} electrons, E_nuc = {:.6} Ha",
        style("✓").green().bold(),
        ints.n_orb,
        ints.nelec,
        ints.e_nuc
    );
    println!("  Output: {}", style(output.display()).green());
    Ok(())
}
