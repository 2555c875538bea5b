//! `fermiq-chem` - molecular Hamiltonians on qubits.
//!
//! Takes one- and two-electron integrals to a number:
//!
//! - **Integrals**: loaded from a named-array JSON file, or generated by an
//!   s-shell STO-3G restricted Hartree–Fock for H/He molecules
//! - **Fermionic Hamiltonian**: `Σ h[P,Q] P^ Q + ½ Σ <PQ|RS> P^ Q^ S R`
//! - **Jordan–Wigner** mapping to a sum of Pauli strings
//! - **Projection** of the qubit Hamiltonian onto a fixed-particle
//!   configuration basis, followed by exact diagonalization
//!
//! # Quick start
//!
//! ```rust
//! use fermiq_chem::configuration::ConfigurationBasis;
//! use fermiq_chem::fermion::{molecular_hamiltonian, SpinMode, DEFAULT_CUTOFF};
//! use fermiq_chem::integrals::IntegralSet;
//! use fermiq_chem::jordan_wigner::jordan_wigner;
//! use fermiq_chem::projection::project_hamiltonian;
//! use fermiq_chem::solver::diagonalize;
//!
//! let ints = IntegralSet::h2_reference();
//! let fermionic = molecular_hamiltonian(&ints, SpinMode::SpinOrbital, DEFAULT_CUTOFF);
//! let qubit = jordan_wigner(&fermionic);
//!
//! let basis = ConfigurationBasis::fixed_particle(4, ints.nelec);
//! let h = project_hamiltonian(&qubit, &basis).unwrap();
//! let spectrum = diagonalize(h).unwrap();
//! assert!((spectrum.ground_energy() - (-1.1373)).abs() < 1e-3);
//! ```

pub mod configuration;
pub mod error;
pub mod fermion;
pub mod integrals;
pub mod jordan_wigner;
pub mod projection;
pub mod qubit;
pub mod scf;
pub mod solver;

pub use configuration::{ConfigurationBasis, binomial, generate_configurations};
pub use error::{ChemError, ChemResult};
pub use fermion::{FermionOperator, LadderOp, SpinMode, molecular_hamiltonian};
pub use integrals::{EriConvention, IntegralSet};
pub use jordan_wigner::jordan_wigner;
pub use projection::{matrix_element, particle_sector, project_hamiltonian};
pub use qubit::{PauliOp, PauliString, QubitOperator};
pub use scf::{Atom, Molecule, RestrictedHartreeFock, ScfOutcome};
pub use solver::{Spectrum, diagonalize};
