//! `fermiq-rbm` - neural-network wavefunctions for small molecules.
//!
//! A restricted Boltzmann machine over occupation configurations, trained
//! by stochastic reconfiguration against a Hamiltonian projected onto the
//! full fixed-particle basis. Every expectation value is an exact weighted
//! sum over that basis; there is no Monte Carlo sampling.
//!
//! # Quick start
//!
//! ```rust
//! use fermiq_chem::{ConfigurationBasis, IntegralSet, SpinMode, jordan_wigner, molecular_hamiltonian};
//! use fermiq_rbm::{Rbm, SrConfig, StochasticReconfiguration};
//!
//! let ints = IntegralSet::h2_reference();
//! let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::SpinOrbital, 1e-12));
//! let basis = ConfigurationBasis::fixed_particle(4, 2);
//!
//! let mut rbm = Rbm::new(4, 4);
//! let trainer = StochasticReconfiguration::new(SrConfig { epochs: 5, ..SrConfig::default() });
//! let trace = trainer.train(&mut rbm, &h, &basis).unwrap();
//! assert_eq!(trace.len(), 5);
//! ```

pub mod error;
pub mod machine;
pub mod sr;

pub use error::{RbmError, RbmResult};
pub use machine::{Rbm, visible_matrix};
pub use sr::{SrConfig, StochasticReconfiguration, TrainingTrace, variational_energy};
