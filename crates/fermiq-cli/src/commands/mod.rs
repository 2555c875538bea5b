//! CLI command implementations.

pub mod common;
pub mod config;
pub mod hamiltonian;
pub mod integrals;
pub mod project;
pub mod rbm;
pub mod regress;
pub mod version;
