//! Error types for the chemistry crate.

use thiserror::Error;

/// Errors produced while loading integrals, building operators or solving.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChemError {
    /// Reading or writing an integral file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The integral file is not valid JSON or a field has the wrong type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required named array is absent from the integral file.
    #[error("integral file has no field '{0}'")]
    MissingField(String),

    /// An array does not have the shape implied by the orbital count.
    #[error("{what} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Which array is malformed.
        what: &'static str,
        /// Shape implied by the orbital count.
        expected: Vec<usize>,
        /// Shape actually found.
        found: Vec<usize>,
    },

    /// A Pauli term addresses a qubit the configuration does not have.
    #[error("Pauli term references qubit {qubit} but configurations only have {n_qubits} sites")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Length of the configurations.
        n_qubits: usize,
    },

    /// A configuration or configuration request is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The s-shell basis has no entry for this element.
    #[error("no STO-3G s-shell basis for atomic number {0}")]
    UnsupportedElement(u32),

    /// The SCF loop hit its iteration limit.
    #[error("SCF did not converge in {iterations} iterations (last density change {delta:.3e})")]
    ScfNotConverged {
        /// Iterations performed.
        iterations: usize,
        /// RMS density change of the final iteration.
        delta: f64,
    },

    /// Eigen-decomposition or matrix inversion failed.
    #[error("eigensolver error: {0}")]
    Eigen(String),
}

/// Result type for chemistry operations.
pub type ChemResult<T> = Result<T, ChemError>;
