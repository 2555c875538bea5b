//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - molecular Hamiltonians, RBM ground states and circuit regression",
        style("Fermiq").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  fermiq-chem  Integrals, Jordan–Wigner mapping, projection, RHF");
    println!("  fermiq-rbm   RBM wavefunction and stochastic reconfiguration");
    println!("  fermiq-vqc   Statevector circuits and parameter-shift regression");
    println!("  fermiq-cli   Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
