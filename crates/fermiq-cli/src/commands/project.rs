//! Project command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use fermiq_chem::{ConfigurationBasis, SpinMode, diagonalize, particle_sector, project_hamiltonian};

use super::common::{ket, load_integrals, qubit_hamiltonian};

/// Execute the project command.
pub fn execute(
    input: &Path,
    electrons: Option<usize>,
    spin_mode: SpinMode,
    cross_check: bool,
) -> Result<()> {
    println!(
        "{} Projecting Hamiltonian from {}",
        style("→").cyan().bold(),
        style(input.display()).green()
    );
    let ints = load_integrals(input)?;
    let n_sites = spin_mode.n_modes(ints.n_orb);
    let k = electrons.unwrap_or(ints.nelec);

    let basis = ConfigurationBasis::fixed_particle(n_sites, k);
    if basis.is_empty() {
        anyhow::bail!("No configurations with {k} electrons in {n_sites} sites");
    }
    println!("  Basis: {} configurations ({k} in {n_sites})", basis.len());

    let h = qubit_hamiltonian(&ints, spin_mode);
    let projected = project_hamiltonian(&h, &basis).context("Projection failed")?;
    let spectrum = diagonalize(projected).context("Diagonalization failed")?;

    println!("\n  {:>4}  {:>16}", "n", "E (Ha)");
    for (i, e) in spectrum.eigenvalues.iter().enumerate() {
        println!("  {:>4}  {:>16.10}", i, e);
    }

    println!(
        "\n{} Ground state: {} Ha",
        style("✓").green().bold(),
        style(format!("{:.10}", spectrum.ground_energy())).green()
    );
    if let Some(config) = spectrum.dominant_configuration(&basis) {
        println!("  Dominant configuration: {}", style(ket(config)).cyan());
    }

    if cross_check {
        let dense = h.to_dense(n_sites).context("Dense build failed")?;
        let sector = diagonalize(particle_sector(&dense, n_sites, k))?;
        let diff = (sector.ground_energy() - spectrum.ground_energy()).abs();
        println!(
            "  Full-Hamiltonian sector: {:.10} Ha (|Δ| = {:.2e})",
            sector.ground_energy(),
            diff
        );
    }

    Ok(())
}
