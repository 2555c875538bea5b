//! Stochastic-reconfiguration training over an exactly enumerated basis.
//!
//! Each epoch:
//!
//! 1. evaluate ψ on every configuration;
//! 2. record `E = ψᵀ Re(H) ψ / ψᵀψ`;
//! 3. form local energies `E_loc(σ) = Σ_σ' Re H[σ,σ'] ψ(σ') / ψ(σ)`;
//! 4. build `S = ⟨OO⟩ − ⟨O⟩⟨O⟩` and `F = ⟨E_loc O⟩ − ⟨E_loc⟩⟨O⟩` with
//!    weights `|ψ|² / Σ|ψ|²`;
//! 5. solve `(S + εI) δ = F` and step `θ ← θ − η δ`.
//!
//! The epoch count is fixed; there is no convergence check.

use fermiq_chem::{ConfigurationBasis, QubitOperator, project_hamiltonian};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{RbmError, RbmResult};
use crate::machine::{Rbm, visible_matrix};

/// Training hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrConfig {
    /// Number of epochs.
    pub epochs: usize,
    /// Step size η.
    pub learning_rate: f64,
    /// Diagonal shift ε added to `S`.
    pub diag_shift: f64,
}

impl Default for SrConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            learning_rate: 0.001,
            diag_shift: 1e-3,
        }
    }
}

/// Energies recorded at the start of each epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingTrace {
    /// One variational energy per epoch.
    pub energies: Vec<f64>,
}

impl TrainingTrace {
    /// Last recorded energy.
    pub fn final_energy(&self) -> Option<f64> {
        self.energies.last().copied()
    }

    /// Lowest recorded energy.
    pub fn min_energy(&self) -> Option<f64> {
        self.energies.iter().copied().reduce(f64::min)
    }

    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

/// Real part of a projected Hamiltonian as an `ndarray` matrix.
pub fn real_part(h: &DMatrix<Complex64>) -> Array2<f64> {
    Array2::from_shape_fn((h.nrows(), h.ncols()), |(r, c)| h[(r, c)].re)
}

/// `ψᵀ H ψ / ψᵀψ`.
pub fn variational_energy(rbm: &Rbm, h: &Array2<f64>, sigmas: &Array2<f64>) -> f64 {
    let psi = rbm.amplitudes(sigmas);
    psi.dot(&h.dot(&psi)) / psi.dot(&psi)
}

/// SR trainer.
#[derive(Debug, Clone, Default)]
pub struct StochasticReconfiguration {
    config: SrConfig,
}

impl StochasticReconfiguration {
    /// Trainer with the given hyper-parameters.
    pub fn new(config: SrConfig) -> Self {
        Self { config }
    }

    /// The hyper-parameters.
    pub fn config(&self) -> &SrConfig {
        &self.config
    }

    /// Project `hamiltonian` onto `basis` and train.
    pub fn train(
        &self,
        rbm: &mut Rbm,
        hamiltonian: &QubitOperator,
        basis: &ConfigurationBasis,
    ) -> RbmResult<TrainingTrace> {
        let projected = project_hamiltonian(hamiltonian, basis)?;
        self.train_projected(rbm, &projected, basis, |_, _| {})
    }

    /// Train against an already projected Hamiltonian, calling `on_epoch`
    /// with each epoch index and its energy.
    pub fn train_projected(
        &self,
        rbm: &mut Rbm,
        hamiltonian: &DMatrix<Complex64>,
        basis: &ConfigurationBasis,
        mut on_epoch: impl FnMut(usize, f64),
    ) -> RbmResult<TrainingTrace> {
        if basis.is_empty() {
            return Err(RbmError::EmptyBasis);
        }
        let n = basis.len();
        if hamiltonian.shape() != (n, n) {
            return Err(RbmError::ShapeMismatch {
                what: "hamiltonian",
                expected: vec![n, n],
                found: vec![hamiltonian.nrows(), hamiltonian.ncols()],
            });
        }
        if rbm.n_visible() != basis.n_sites() {
            return Err(RbmError::ShapeMismatch {
                what: "visible layer",
                expected: vec![basis.n_sites()],
                found: vec![rbm.n_visible()],
            });
        }

        let h = real_part(hamiltonian);
        let sigmas = visible_matrix(basis);
        let mut trace = TrainingTrace {
            energies: Vec::with_capacity(self.config.epochs),
        };

        for epoch in 0..self.config.epochs {
            let energy = self.step(rbm, &h, &sigmas, epoch)?;
            debug!(epoch, energy, "sr epoch");
            on_epoch(epoch, energy);
            trace.energies.push(energy);
        }

        if let Some(last) = trace.final_energy() {
            info!(epochs = self.config.epochs, energy = last, "sr training finished");
        }
        Ok(trace)
    }

    /// One SR update; returns the energy before the update.
    fn step(
        &self,
        rbm: &mut Rbm,
        h: &Array2<f64>,
        sigmas: &Array2<f64>,
        epoch: usize,
    ) -> RbmResult<f64> {
        let psi = rbm.amplitudes(sigmas);
        let h_psi = h.dot(&psi);
        let norm = psi.dot(&psi);
        let energy = psi.dot(&h_psi) / norm;

        let e_loc = &h_psi / &psi;
        let weights = psi.mapv(|p| p * p / norm);

        let n_params = rbm.n_params();
        let mut o = Array2::<f64>::zeros((sigmas.nrows(), n_params));
        for (i, sigma) in sigmas.rows().into_iter().enumerate() {
            o.row_mut(i).assign(&rbm.flat_log_derivatives(sigma));
        }

        let mean_o: Array1<f64> = weights.dot(&o);
        let mean_e = weights.dot(&e_loc);

        let weighted_o = &o * &weights.view().insert_axis(Axis(1));
        let s = weighted_o.t().dot(&o)
            - &mean_o
                .view()
                .insert_axis(Axis(1))
                .dot(&mean_o.view().insert_axis(Axis(0)));
        let f = weighted_o.t().dot(&e_loc) - mean_e * &mean_o;

        let delta = solve_shifted(&s, &f, self.config.diag_shift)
            .ok_or(RbmError::SingularMetric { epoch })?;
        rbm.apply_update(&delta, self.config.learning_rate);
        Ok(energy)
    }
}

/// Solve `(S + εI) x = F`, Cholesky first and LU as fallback.
fn solve_shifted(s: &Array2<f64>, f: &Array1<f64>, shift: f64) -> Option<Array1<f64>> {
    let n = f.len();
    let m = DMatrix::from_fn(n, n, |r, c| s[[r, c]] + if r == c { shift } else { 0.0 });
    let rhs = DVector::from_iterator(n, f.iter().copied());
    let x = match m.clone().cholesky() {
        Some(chol) => chol.solve(&rhs),
        None => m.lu().solve(&rhs)?,
    };
    if x.iter().all(|v| v.is_finite()) {
        Some(x.iter().copied().collect())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_solve_shifted_identity() {
        let s = Array2::<f64>::zeros((2, 2));
        let f = array![1.0, -2.0];
        let x = solve_shifted(&s, &f, 0.5).unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_shifted_singular() {
        let s = Array2::<f64>::zeros((2, 2));
        assert!(solve_shifted(&s, &array![1.0, 1.0], 0.0).is_none());
    }

    #[test]
    fn test_indefinite_falls_back_to_lu() {
        let s = array![[0.0, 1.0], [1.0, 0.0]];
        let x = solve_shifted(&s, &array![1.0, 2.0], 0.0).unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trace_accessors() {
        let t = TrainingTrace {
            energies: vec![-1.0, -1.5, -1.2],
        };
        assert_eq!(t.len(), 3);
        assert_eq!(t.final_energy(), Some(-1.2));
        assert_eq!(t.min_energy(), Some(-1.5));
        assert!(TrainingTrace::default().final_energy().is_none());
    }

    #[test]
    fn test_config_defaults() {
        let c = SrConfig::default();
        assert_eq!(c.epochs, 50);
        assert_eq!(c.learning_rate, 0.001);
        assert_eq!(c.diag_shift, 1e-3);
    }
}
