//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use fermiq_chem::fermion::DEFAULT_CUTOFF;
use fermiq_chem::{IntegralSet, QubitOperator, SpinMode, jordan_wigner, molecular_hamiltonian};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

/// Load an integral file.
pub fn load_integrals(path: &Path) -> Result<IntegralSet> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let ints = IntegralSet::load(path)
        .with_context(|| format!("Failed to load integrals from {}", path.display()))?;
    println!(
        "  Loaded: {} orbitals, {} electrons, E_nuc = {:.6} Ha",
        ints.n_orb, ints.nelec, ints.e_nuc
    );
    Ok(ints)
}

/// Second-quantize and map to qubits.
pub fn qubit_hamiltonian(ints: &IntegralSet, mode: SpinMode) -> QubitOperator {
    jordan_wigner(&molecular_hamiltonian(ints, mode, DEFAULT_CUTOFF))
}

/// A bar counting `len` steps, styled like the rest of the CLI.
pub fn progress_bar(len: usize, label: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")?
            .progress_chars("█▉░"),
    );
    pb.set_message(label.to_string());
    Ok(pb)
}

/// Write `values` as JSON when the extension is `.json`, CSV otherwise.
pub fn write_series(path: &Path, column: &str, values: &[f64]) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let content = if is_json {
        serde_json::to_string_pretty(&json!({ column: values }))?
    } else {
        let mut csv = format!("step,{column}\n");
        for (i, v) in values.iter().enumerate() {
            csv.push_str(&format!("{i},{v}\n"));
        }
        csv
    };

    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    println!("  Exported: {}", style(path.display()).green());
    Ok(())
}

/// Render a configuration as `|1100⟩`.
pub fn ket(config: &[u8]) -> String {
    let bits: String = config.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect();
    format!("|{bits}⟩")
}
