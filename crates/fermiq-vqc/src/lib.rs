//! Variational quantum circuit regression.
//!
//! A small statevector simulator runs single-qubit rotations and CNOTs.
//! Circuits encode a scalar input as `RX(x·π)`, apply trainable rotations,
//! and read out ⟨Z_0⟩. Gradients come from the parameter-shift rule and feed
//! a Nesterov-momentum or Adam optimizer.
//!
//! # Quick start
//!
//! ```
//! use fermiq_vqc::{Ansatz, RegressionTask};
//!
//! let mut task = RegressionTask::preset(Ansatz::Linear);
//! task.iterations = 10;
//! let report = task.fit().unwrap();
//! assert!(report.final_loss() < report.initial_loss);
//! ```

pub mod ansatz;
pub mod circuit;
pub mod error;
pub mod optimizer;
pub mod regression;
pub mod statevector;

pub use ansatz::Ansatz;
pub use circuit::{Angle, Axis, Gate, VariationalCircuit};
pub use error::{VqcError, VqcResult};
pub use optimizer::{Adam, GradientOptimizer, NesterovMomentum};
pub use regression::{Dataset, FitReport, OptimizerKind, RegressionTask, ScaledModel, Target};
pub use statevector::Statevector;
