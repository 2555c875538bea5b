//! The restricted Boltzmann machine ansatz.
//!
//! For visible configuration σ and hidden pre-activations θ = b + σW:
//!
//!   ψ(σ) = exp(a·σ) · Π_j 2 cosh θ_j
//!
//! [`Rbm::psi`] clips `a·σ` to ±20 and each θ_j to ±10, so it is finite for
//! any parameters. [`Rbm::log_psi`] is unclipped but evaluates ln(2 cosh x)
//! without forming cosh, which keeps it finite as well.

use fermiq_chem::ConfigurationBasis;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{RbmError, RbmResult};

/// Clip bound for the visible term.
pub const VISIBLE_CLIP: f64 = 20.0;
/// Clip bound for each hidden pre-activation.
pub const HIDDEN_CLIP: f64 = 10.0;

/// Default standard deviation of the initial parameters.
pub const DEFAULT_INIT_STD: f64 = 0.01;
/// Default initialization seed.
pub const DEFAULT_SEED: u64 = 42;

/// `ln(2 cosh x)` without overflow.
pub fn log_2cosh(x: f64) -> f64 {
    let ax = x.abs();
    ax + (-2.0 * ax).exp().ln_1p()
}

/// Visible bias, hidden bias and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Rbm {
    /// Visible bias `a`, length n_visible.
    pub a: Array1<f64>,
    /// Hidden bias `b`, length n_hidden.
    pub b: Array1<f64>,
    /// Weights `W`, n_visible × n_hidden.
    pub w: Array2<f64>,
}

impl Rbm {
    /// Parameters drawn from N(0, 0.01²) with seed 42.
    pub fn new(n_visible: usize, n_hidden: usize) -> Self {
        Self::sample(n_visible, n_hidden, DEFAULT_INIT_STD, DEFAULT_SEED)
    }

    /// Parameters drawn from N(0, std²) with the given seed.
    pub fn random(n_visible: usize, n_hidden: usize, std: f64, seed: u64) -> RbmResult<Self> {
        if !std.is_finite() || std < 0.0 {
            return Err(RbmError::InvalidDistribution(format!(
                "standard deviation must be finite and non-negative, got {std}"
            )));
        }
        Ok(Self::sample(n_visible, n_hidden, std, seed))
    }

    fn sample(n_visible: usize, n_hidden: usize, std: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut draw = || {
            let z: f64 = StandardNormal.sample(&mut rng);
            std * z
        };
        let a = Array1::from_shape_simple_fn(n_visible, &mut draw);
        let b = Array1::from_shape_simple_fn(n_hidden, &mut draw);
        let w = Array2::from_shape_simple_fn((n_visible, n_hidden), &mut draw);
        Self { a, b, w }
    }

    /// Wrap explicit parameters, checking that the shapes agree.
    pub fn from_parameters(a: Array1<f64>, b: Array1<f64>, w: Array2<f64>) -> RbmResult<Self> {
        if w.dim() != (a.len(), b.len()) {
            return Err(RbmError::ShapeMismatch {
                what: "weights",
                expected: vec![a.len(), b.len()],
                found: w.shape().to_vec(),
            });
        }
        Ok(Self { a, b, w })
    }

    /// Number of visible units.
    pub fn n_visible(&self) -> usize {
        self.a.len()
    }

    /// Number of hidden units.
    pub fn n_hidden(&self) -> usize {
        self.b.len()
    }

    /// Total parameter count, `n_v + n_h + n_v·n_h`.
    pub fn n_params(&self) -> usize {
        self.a.len() + self.b.len() + self.w.len()
    }

    fn preactivation(&self, sigma: ArrayView1<'_, f64>) -> Array1<f64> {
        &self.b + &sigma.dot(&self.w)
    }

    /// Clipped amplitude ψ(σ).
    pub fn psi(&self, sigma: ArrayView1<'_, f64>) -> f64 {
        let visible = self.a.dot(&sigma).clamp(-VISIBLE_CLIP, VISIBLE_CLIP);
        let hidden: f64 = self
            .preactivation(sigma)
            .iter()
            .map(|t| 2.0 * t.clamp(-HIDDEN_CLIP, HIDDEN_CLIP).cosh())
            .product();
        visible.exp() * hidden
    }

    /// ln ψ(σ) without clipping.
    pub fn log_psi(&self, sigma: ArrayView1<'_, f64>) -> f64 {
        self.a.dot(&sigma) + self.preactivation(sigma).iter().map(|&t| log_2cosh(t)).sum::<f64>()
    }

    /// `(∂/∂a, ∂/∂b, ∂/∂W)` of ln ψ at σ: `(σ, tanh θ, σ ⊗ tanh θ)`.
    pub fn log_derivatives(&self, sigma: ArrayView1<'_, f64>) -> (Array1<f64>, Array1<f64>, Array2<f64>) {
        let tanh = self.preactivation(sigma).mapv(f64::tanh);
        let outer = sigma
            .to_owned()
            .insert_axis(Axis(1))
            .dot(&tanh.view().insert_axis(Axis(0)));
        (sigma.to_owned(), tanh, outer)
    }

    /// Log-derivatives flattened as `[a, b, W]`, W row-major.
    pub fn flat_log_derivatives(&self, sigma: ArrayView1<'_, f64>) -> Array1<f64> {
        let (da, db, dw) = self.log_derivatives(sigma);
        da.iter().chain(db.iter()).chain(dw.iter()).copied().collect()
    }

    /// Amplitude of each row of `sigmas`.
    pub fn amplitudes(&self, sigmas: &Array2<f64>) -> Array1<f64> {
        sigmas.rows().into_iter().map(|s| self.psi(s)).collect()
    }

    /// Subtract `step · delta` from the parameters, `delta` laid out as
    /// [`Rbm::flat_log_derivatives`].
    pub fn apply_update(&mut self, delta: &Array1<f64>, step: f64) {
        let (nv, nh) = (self.n_visible(), self.n_hidden());
        for (i, x) in self.a.iter_mut().enumerate() {
            *x -= step * delta[i];
        }
        for (j, x) in self.b.iter_mut().enumerate() {
            *x -= step * delta[nv + j];
        }
        for ((i, j), x) in self.w.indexed_iter_mut() {
            *x -= step * delta[nv + nh + i * nh + j];
        }
    }
}

/// Configurations of `basis` as rows of 0.0/1.0.
pub fn visible_matrix(basis: &ConfigurationBasis) -> Array2<f64> {
    Array2::from_shape_fn((basis.len(), basis.n_sites()), |(r, c)| {
        f64::from(basis.configs()[r][c])
    })
}
