//! Curve fitting with a scaled circuit expectation as the model.
//!
//! Inputs `X` lie in `[0, π]`. The circuit sees `x = X / π`, so its encoding
//! gate is `RX(X)`, while targets are evaluated on the raw `X`. The model is
//!
//!   f(X) = scale · ⟨Z_0⟩(X / π, w) + shift
//!
//! and the loss is the mean squared error over the dataset.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ansatz::Ansatz;
use crate::circuit::VariationalCircuit;
use crate::error::{VqcError, VqcResult};
use crate::optimizer::{Adam, GradientOptimizer, NesterovMomentum};

/// Function to regress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// `2X + 1`
    Linear,
    /// `sin(2X) + X`
    SinePlusLinear,
}

impl Target {
    /// Evaluate at `x`.
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Target::Linear => 2.0 * x + 1.0,
            Target::SinePlusLinear => (2.0 * x).sin() + x,
        }
    }
}

/// Sample points and their targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Inputs `X`.
    pub inputs: Vec<f64>,
    /// Targets `y = target(X)`.
    pub targets: Vec<f64>,
}

impl Dataset {
    /// `n` evenly spaced points on `[0, π]`, endpoints included.
    pub fn generate(target: Target, n: usize) -> Self {
        let inputs: Vec<f64> = match n {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => (0..n).map(|i| PI * i as f64 / (n - 1) as f64).collect(),
        };
        let targets = inputs.iter().map(|&x| target.eval(x)).collect();
        Self { inputs, targets }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// A circuit with an affine readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledModel {
    /// The circuit.
    pub circuit: VariationalCircuit,
    /// Multiplier on ⟨Z_0⟩.
    pub scale: f64,
    /// Offset.
    pub shift: f64,
}

impl ScaledModel {
    /// Model output at raw input `x`.
    pub fn predict(&self, x: f64, weights: &[f64]) -> VqcResult<f64> {
        Ok(self.scale * self.circuit.expectation(x / PI, weights)? + self.shift)
    }

    /// Predictions on every input of `data`.
    pub fn predict_all(&self, data: &Dataset, weights: &[f64]) -> VqcResult<Vec<f64>> {
        data.inputs.iter().map(|&x| self.predict(x, weights)).collect()
    }

    /// Mean squared error over `data`.
    pub fn cost(&self, data: &Dataset, weights: &[f64]) -> VqcResult<f64> {
        if data.is_empty() {
            return Err(VqcError::EmptyDataset);
        }
        let mut total = 0.0;
        for (&x, &y) in data.inputs.iter().zip(&data.targets) {
            let r = self.predict(x, weights)? - y;
            total += r * r;
        }
        Ok(total / data.len() as f64)
    }

    /// ∂cost/∂weights via the parameter-shift gradient of each prediction.
    pub fn cost_gradient(&self, data: &Dataset, weights: &[f64]) -> VqcResult<Vec<f64>> {
        if data.is_empty() {
            return Err(VqcError::EmptyDataset);
        }
        let n = data.len() as f64;
        let mut grad = vec![0.0; weights.len()];
        for (&x, &y) in data.inputs.iter().zip(&data.targets) {
            let residual = self.predict(x, weights)? - y;
            let dz = self.circuit.gradient(x / PI, weights)?;
            for (g, d) in grad.iter_mut().zip(dz) {
                *g += 2.0 * residual * self.scale * d / n;
            }
        }
        Ok(grad)
    }
}

/// Optimizer choice for a [`RegressionTask`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptimizerKind {
    /// [`NesterovMomentum`]
    Nesterov {
        /// Step size.
        stepsize: f64,
        /// Momentum.
        momentum: f64,
    },
    /// [`Adam`]
    Adam {
        /// Step size.
        stepsize: f64,
    },
}

/// Everything needed to run one fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTask {
    /// Circuit layout.
    pub ansatz: Ansatz,
    /// Function to fit.
    pub target: Target,
    /// Dataset size.
    pub n_points: usize,
    /// Readout multiplier.
    pub scale: f64,
    /// Readout offset.
    pub shift: f64,
    /// Update rule.
    pub optimizer: OptimizerKind,
    /// Number of optimizer steps.
    pub iterations: usize,
    /// Starting weights.
    pub initial_weights: Vec<f64>,
    /// Emit an info event every this many steps; 0 disables.
    pub log_every: usize,
}

impl RegressionTask {
    /// The stock configuration for `ansatz`.
    pub fn preset(ansatz: Ansatz) -> Self {
        match ansatz {
            Ansatz::Linear => Self {
                ansatz,
                target: Target::Linear,
                n_points: 20,
                scale: -4.0,
                shift: 5.0,
                optimizer: OptimizerKind::Nesterov {
                    stepsize: 0.1,
                    momentum: 0.9,
                },
                iterations: 100,
                initial_weights: vec![0.1],
                log_every: 10,
            },
            Ansatz::Layered => Self {
                ansatz,
                target: Target::SinePlusLinear,
                n_points: 30,
                scale: -3.0,
                shift: 2.5,
                optimizer: OptimizerKind::Adam { stepsize: 0.05 },
                iterations: 250,
                initial_weights: vec![0.01; 4],
                log_every: 25,
            },
            Ansatz::Entangled => Self {
                ansatz,
                target: Target::SinePlusLinear,
                n_points: 30,
                scale: -3.0,
                shift: 2.5,
                optimizer: OptimizerKind::Adam { stepsize: 0.05 },
                iterations: 300,
                initial_weights: vec![0.01; 8],
                log_every: 30,
            },
        }
    }

    /// Circuit and readout for this task.
    pub fn model(&self) -> VqcResult<ScaledModel> {
        Ok(ScaledModel {
            circuit: self.ansatz.circuit()?,
            scale: self.scale,
            shift: self.shift,
        })
    }

    /// Run with the configured optimizer.
    pub fn fit(&self) -> VqcResult<FitReport> {
        self.fit_observed(|_, _| {})
    }

    /// Run with the configured optimizer, calling `on_step` with each step
    /// index and the loss after it.
    pub fn fit_observed(&self, on_step: impl FnMut(usize, f64)) -> VqcResult<FitReport> {
        match self.optimizer {
            OptimizerKind::Nesterov { stepsize, momentum } => {
                self.fit_with(&mut NesterovMomentum::new(stepsize, momentum), on_step)
            }
            OptimizerKind::Adam { stepsize } => self.fit_with(&mut Adam::new(stepsize), on_step),
        }
    }

    /// Whether progress is reported after `step`. Steps count from zero, so
    /// the first step is always reported.
    pub fn reports_step(&self, step: usize) -> bool {
        self.log_every > 0 && step % self.log_every == 0
    }

    /// Run with an explicit optimizer.
    pub fn fit_with<O: GradientOptimizer>(
        &self,
        optimizer: &mut O,
        mut on_step: impl FnMut(usize, f64),
    ) -> VqcResult<FitReport> {
        let model = self.model()?;
        let dataset = Dataset::generate(self.target, self.n_points);
        let mut weights = self.initial_weights.clone();
        let initial_loss = model.cost(&dataset, &weights)?;
        let mut losses = Vec::with_capacity(self.iterations);

        for step in 0..self.iterations {
            let at = optimizer.lookahead(&weights);
            let grad = model.cost_gradient(&dataset, &at)?;
            optimizer.step(&mut weights, &grad);
            let loss = model.cost(&dataset, &weights)?;
            debug!(step, loss, "regression step");
            if self.reports_step(step) {
                info!(ansatz = %self.ansatz, step, loss, "training progress");
            }
            on_step(step, loss);
            losses.push(loss);
        }

        let predictions = model.predict_all(&dataset, &weights)?;
        info!(
            ansatz = %self.ansatz,
            initial_loss,
            final_loss = losses.last().copied().unwrap_or(initial_loss),
            "regression finished"
        );
        Ok(FitReport {
            ansatz: self.ansatz,
            initial_loss,
            weights,
            losses,
            predictions,
            dataset,
        })
    }
}

/// Outcome of [`RegressionTask::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Circuit layout used.
    pub ansatz: Ansatz,
    /// Loss at the starting weights.
    pub initial_loss: f64,
    /// Trained weights.
    pub weights: Vec<f64>,
    /// Loss after each step.
    pub losses: Vec<f64>,
    /// Model output at each input with the trained weights.
    pub predictions: Vec<f64>,
    /// The data that was fitted.
    pub dataset: Dataset,
}

impl FitReport {
    /// Loss after the last step, or the initial loss if no steps ran.
    pub fn final_loss(&self) -> f64 {
        self.losses.last().copied().unwrap_or(self.initial_loss)
    }
}
