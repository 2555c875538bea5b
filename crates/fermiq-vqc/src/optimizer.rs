//! First-order optimizers for circuit weights.
//!
//! Both carry per-weight state that is lazily sized on the first step.

use serde::{Deserialize, Serialize};

/// A stateful gradient-descent update rule.
pub trait GradientOptimizer {
    /// Point at which the gradient for the next step should be evaluated.
    ///
    /// Plain methods evaluate at `params` itself.
    fn lookahead(&self, params: &[f64]) -> Vec<f64> {
        params.to_vec()
    }

    /// Update `params` in place given the gradient taken at [`lookahead`](Self::lookahead).
    fn step(&mut self, params: &mut [f64], grad: &[f64]);
}

/// Nesterov momentum.
///
/// The gradient is taken at `θ − μ·a`, then `a ← μ·a + η·g` and `θ ← θ − a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NesterovMomentum {
    /// Step size η.
    pub stepsize: f64,
    /// Momentum μ.
    pub momentum: f64,
    #[serde(skip)]
    accumulation: Vec<f64>,
}

impl NesterovMomentum {
    /// New optimizer with zero accumulation.
    pub fn new(stepsize: f64, momentum: f64) -> Self {
        Self {
            stepsize,
            momentum,
            accumulation: Vec::new(),
        }
    }

    fn ensure_len(&mut self, n: usize) {
        if self.accumulation.len() != n {
            self.accumulation = vec![0.0; n];
        }
    }
}

impl Default for NesterovMomentum {
    fn default() -> Self {
        Self::new(0.1, 0.9)
    }
}

impl GradientOptimizer for NesterovMomentum {
    fn lookahead(&self, params: &[f64]) -> Vec<f64> {
        if self.accumulation.len() != params.len() {
            return params.to_vec();
        }
        params
            .iter()
            .zip(&self.accumulation)
            .map(|(p, a)| p - self.momentum * a)
            .collect()
    }

    fn step(&mut self, params: &mut [f64], grad: &[f64]) {
        self.ensure_len(params.len());
        for ((p, a), g) in params.iter_mut().zip(self.accumulation.iter_mut()).zip(grad) {
            *a = self.momentum * *a + self.stepsize * g;
            *p -= *a;
        }
    }
}

/// Adam with bias correction folded into the step size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adam {
    /// Step size η.
    pub stepsize: f64,
    /// First-moment decay.
    pub beta1: f64,
    /// Second-moment decay.
    pub beta2: f64,
    /// Denominator offset.
    pub eps: f64,
    #[serde(skip)]
    m: Vec<f64>,
    #[serde(skip)]
    v: Vec<f64>,
    #[serde(skip)]
    t: i32,
}

impl Adam {
    /// New optimizer with β1 = 0.9, β2 = 0.99, ε = 1e-8.
    pub fn new(stepsize: f64) -> Self {
        Self {
            stepsize,
            beta1: 0.9,
            beta2: 0.99,
            eps: 1e-8,
            m: Vec::new(),
            v: Vec::new(),
            t: 0,
        }
    }

    /// Steps taken so far.
    pub fn steps(&self) -> i32 {
        self.t
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl GradientOptimizer for Adam {
    fn step(&mut self, params: &mut [f64], grad: &[f64]) {
        if self.m.len() != params.len() {
            self.m = vec![0.0; params.len()];
            self.v = vec![0.0; params.len()];
            self.t = 0;
        }
        self.t += 1;
        let lr_t = self.stepsize * (1.0 - self.beta2.powi(self.t)).sqrt()
            / (1.0 - self.beta1.powi(self.t));
        for (i, (p, g)) in params.iter_mut().zip(grad).enumerate() {
            self.m[i] = self.beta1 * self.m[i] + (1.0 - self.beta1) * g;
            self.v[i] = self.beta2 * self.v[i] + (1.0 - self.beta2) * g * g;
            *p -= lr_t * self.m[i] / (self.v[i].sqrt() + self.eps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nesterov_first_steps() {
        let mut opt = NesterovMomentum::new(0.1, 0.9);
        let mut p = vec![1.0];
        assert_eq!(opt.lookahead(&p), vec![1.0]);
        opt.step(&mut p, &[2.0]);
        // a = 0.2
        assert_relative_eq!(p[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(opt.lookahead(&p)[0], 0.8 - 0.9 * 0.2, epsilon = 1e-12);
        opt.step(&mut p, &[1.0]);
        // a = 0.18 + 0.1
        assert_relative_eq!(p[0], 0.8 - 0.28, epsilon = 1e-12);
    }

    #[test]
    fn test_adam_first_step_moves_by_stepsize() {
        let mut opt = Adam::new(0.05);
        let mut p = vec![0.0, 0.0];
        opt.step(&mut p, &[3.0, -0.5]);
        // lr_t = η on the first step, so each weight moves by about η against its gradient
        assert_relative_eq!(p[0], -0.05 * 0.3 / (0.3 + 1e-8), epsilon = 1e-12);
        assert_relative_eq!(p[1], 0.05, epsilon = 1e-6);
        assert!(p[1] > 0.0);
        assert_eq!(opt.steps(), 1);
    }

    #[test]
    fn test_adam_descends_quadratic() {
        let mut opt = Adam::new(0.1);
        let mut p = vec![2.0];
        for _ in 0..200 {
            let g = [2.0 * p[0]];
            opt.step(&mut p, &g);
        }
        assert!(p[0].abs() < 0.5);
    }
}
