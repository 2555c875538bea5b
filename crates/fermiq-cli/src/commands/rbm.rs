//! RBM command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use fermiq_chem::{ConfigurationBasis, SpinMode, diagonalize, project_hamiltonian};
use fermiq_rbm::{Rbm, StochasticReconfiguration};
use tracing::info;

use super::common::{load_integrals, progress_bar, qubit_hamiltonian, write_series};
use super::config::RunConfig;

/// Arguments of the rbm command.
pub struct RbmArgs {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub epochs: Option<usize>,
    pub lr: Option<f64>,
    pub seed: Option<u64>,
    pub reference: Option<f64>,
    pub spin_mode: SpinMode,
    pub export: Option<PathBuf>,
}

/// Execute the rbm command.
pub fn execute(args: &RbmArgs) -> Result<()> {
    let mut config =
        RunConfig::load(args.config.as_deref()).context("Failed to load run configuration")?;
    if let Some(epochs) = args.epochs {
        config.rbm.epochs = epochs;
    }
    if let Some(lr) = args.lr {
        config.rbm.learning_rate = lr;
    }
    if let Some(seed) = args.seed {
        config.rbm.seed = seed;
    }
    config.validate().context("Invalid RBM settings")?;
    let settings = config.rbm;
    info!(
        epochs = settings.epochs,
        learning_rate = settings.learning_rate,
        diag_shift = settings.diag_shift,
        seed = settings.seed,
        "resolved rbm settings"
    );

    println!(
        "{} Training RBM on {}",
        style("→").cyan().bold(),
        style(args.input.display()).green()
    );
    let ints = load_integrals(&args.input)?;
    let n_sites = args.spin_mode.n_modes(ints.n_orb);
    let basis = ConfigurationBasis::fixed_particle(n_sites, ints.nelec);
    if basis.is_empty() {
        anyhow::bail!("No configurations with {} electrons in {n_sites} sites", ints.nelec);
    }

    let h = qubit_hamiltonian(&ints, args.spin_mode);
    let projected = project_hamiltonian(&h, &basis).context("Projection failed")?;

    let n_hidden = settings.hidden.unwrap_or(n_sites);
    let mut rbm = Rbm::random(n_sites, n_hidden, settings.init_std, settings.seed)?;
    println!(
        "  RBM: {} visible, {} hidden, {} parameters; {} configurations",
        n_sites,
        n_hidden,
        rbm.n_params(),
        basis.len()
    );
    println!(
        "  SR: {} epochs, lr {}, shift {}, seed {}",
        settings.epochs, settings.learning_rate, settings.diag_shift, settings.seed
    );

    let reference = match args.reference {
        Some(e) => e,
        None => diagonalize(projected.clone())?.ground_energy(),
    };

    let trainer = StochasticReconfiguration::new(settings.sr_config());
    let pb = progress_bar(settings.epochs, "SR")?;
    let trace = trainer.train_projected(&mut rbm, &projected, &basis, |_, energy| {
        pb.set_message(format!("SR E = {energy:.6}"));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    let Some(last) = trace.final_energy() else {
        println!("  No epochs run");
        return Ok(());
    };
    let first = trace.energies[0];
    let best = trace.min_energy().unwrap_or(last);

    println!("{} Training complete", style("✓").green().bold());
    println!("  Initial energy:  {first:>14.8} Ha");
    println!("  Final energy:    {} Ha", style(format!("{last:>14.8}")).green());
    println!("  Lowest energy:   {best:>14.8} Ha");
    println!("  Reference:       {reference:>14.8} Ha");
    println!(
        "  Error:           {} Ha",
        style(format!("{:>14.2e}", last - reference)).yellow()
    );

    if let Some(path) = &args.export {
        write_series(path, "energy", &trace.energies)?;
    }
    Ok(())
}
