//! Fermiq Command-Line Interface
//!
//! Electronic-structure Hamiltonians, truncated-basis diagonalization, RBM
//! ground states and variational-circuit regression from one binary.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use fermiq_chem::SpinMode;
use fermiq_vqc::Ansatz;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{hamiltonian, integrals, project, rbm, regress, version};

/// Fermiq - second-quantized Hamiltonians, RBM wavefunctions and circuit regression
#[derive(Parser)]
#[command(name = "fermiq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate H₂/STO-3G molecular-orbital integrals
    Integrals {
        /// Bond length in Å
        #[arg(long, default_value = "0.734")]
        bond: f64,

        /// Write the tabulated reference set at 1.4 bohr instead of running SCF
        #[arg(long)]
        reference: bool,

        /// Output file
        #[arg(short, long, default_value = "h2_integrals.json")]
        output: PathBuf,
    },

    /// Build the Jordan–Wigner qubit Hamiltonian and list its terms
    Hamiltonian {
        /// Integral file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Orbital-to-mode mapping (spin-orbital, spatial)
        #[arg(long, default_value = "spin-orbital")]
        spin_mode: SpinMode,

        /// Number of terms to print
        #[arg(long, default_value = "10")]
        show: usize,
    },

    /// Diagonalize the Hamiltonian in a fixed-particle configuration basis
    Project {
        /// Integral file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Electron count (defaults to the file's nelec)
        #[arg(short, long)]
        electrons: Option<usize>,

        /// Orbital-to-mode mapping (spin-orbital, spatial)
        #[arg(long, default_value = "spin-orbital")]
        spin_mode: SpinMode,

        /// Compare against the full qubit Hamiltonian's particle sector
        #[arg(long)]
        cross_check: bool,
    },

    /// Train an RBM wavefunction with stochastic reconfiguration
    Rbm {
        /// Integral file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// YAML run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of epochs
        #[arg(long)]
        epochs: Option<usize>,

        /// Learning rate
        #[arg(long)]
        lr: Option<f64>,

        /// Initialization seed
        #[arg(long)]
        seed: Option<u64>,

        /// Reference energy (defaults to exact diagonalization)
        #[arg(long, allow_hyphen_values = true)]
        reference: Option<f64>,

        /// Orbital-to-mode mapping (spin-orbital, spatial)
        #[arg(long, default_value = "spin-orbital")]
        spin_mode: SpinMode,

        /// Write the energy series (.json, otherwise CSV)
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Fit a variational circuit to a target curve
    Regress {
        /// Circuit layout (linear, layered, entangled)
        #[arg(short, long, default_value = "linear")]
        model: Ansatz,

        /// YAML run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of optimizer steps
        #[arg(long)]
        iterations: Option<usize>,

        /// Write the loss series (.json, otherwise CSV)
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Integrals {
            bond,
            reference,
            output,
        } => integrals::execute(bond, reference, &output),

        Commands::Hamiltonian {
            input,
            spin_mode,
            show,
        } => hamiltonian::execute(&input, spin_mode, show),

        Commands::Project {
            input,
            electrons,
            spin_mode,
            cross_check,
        } => project::execute(&input, electrons, spin_mode, cross_check),

        Commands::Rbm {
            input,
            config,
            epochs,
            lr,
            seed,
            reference,
            spin_mode,
            export,
        } => rbm::execute(&rbm::RbmArgs {
            input,
            config,
            epochs,
            lr,
            seed,
            reference,
            spin_mode,
            export,
        }),

        Commands::Regress {
            model,
            config,
            iterations,
            export,
        } => regress::execute(model, config.as_deref(), iterations, export.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
