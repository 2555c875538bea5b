//! Error types for circuit construction and regression.

use thiserror::Error;

/// Errors produced by circuits, models and training.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VqcError {
    /// A gate addresses a qubit the circuit does not have.
    #[error("qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: usize,
        /// Circuit width.
        num_qubits: usize,
    },

    /// The weight vector does not match the circuit.
    #[error("circuit takes {expected} weights, got {found}")]
    WeightCount {
        /// Weights the circuit references.
        expected: usize,
        /// Weights supplied.
        found: usize,
    },

    /// A cost was requested over no data points.
    #[error("dataset is empty")]
    EmptyDataset,

    /// An ansatz name was not recognized.
    #[error("unknown ansatz '{0}' (expected linear, layered or entangled)")]
    UnknownAnsatz(String),
}

/// Result type for circuit operations.
pub type VqcResult<T> = Result<T, VqcError>;
