//! Error types for RBM training.

use fermiq_chem::ChemError;
use thiserror::Error;

/// Errors produced while building or training an RBM.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RbmError {
    /// Parameters, configurations and Hamiltonian disagree on a dimension.
    #[error("{what} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Which object is malformed.
        what: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Shape actually found.
        found: Vec<usize>,
    },

    /// The configuration basis has no states to train on.
    #[error("configuration basis is empty")]
    EmptyBasis,

    /// `S + εI` could not be solved at this epoch.
    #[error("quantum geometric tensor is singular at epoch {epoch}")]
    SingularMetric {
        /// Zero-based epoch index.
        epoch: usize,
    },

    /// The initialization distribution is invalid.
    #[error("invalid initialization distribution: {0}")]
    InvalidDistribution(String),

    /// Projecting the Hamiltonian failed.
    #[error(transparent)]
    Chem(#[from] ChemError),
}

/// Result type for RBM operations.
pub type RbmResult<T> = Result<T, RbmError>;
