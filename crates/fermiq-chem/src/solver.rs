//! Exact diagonalization of projected Hamiltonians.

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use num_complex::Complex64;
use tracing::info;

use crate::configuration::ConfigurationBasis;
use crate::error::{ChemError, ChemResult};

/// Eigenvalues in ascending order with matching eigenvector columns.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Ascending eigenvalues.
    pub eigenvalues: Vec<f64>,
    /// Column `i` is the eigenvector of `eigenvalues[i]`.
    pub eigenvectors: DMatrix<Complex64>,
}

impl Spectrum {
    /// Lowest eigenvalue.
    pub fn ground_energy(&self) -> f64 {
        self.eigenvalues[0]
    }

    /// Eigenvector of the lowest eigenvalue.
    pub fn ground_state(&self) -> DVector<Complex64> {
        self.eigenvectors.column(0).into_owned()
    }

    /// Configuration carrying the largest ground-state weight.
    pub fn dominant_configuration<'a>(&self, basis: &'a ConfigurationBasis) -> Option<&'a [u8]> {
        let ground = self.eigenvectors.column(0);
        let (best, _) = ground
            .iter()
            .map(Complex64::norm_sqr)
            .enumerate()
            .fold((None, f64::NEG_INFINITY), |(bi, bw), (i, w)| {
                if w > bw { (Some(i), w) } else { (bi, bw) }
            });
        best.and_then(|i| basis.get(i))
    }
}

/// Diagonalize a Hermitian matrix.
///
/// Only the lower triangle is read.
pub fn diagonalize(matrix: DMatrix<Complex64>) -> ChemResult<Spectrum> {
    if matrix.nrows() != matrix.ncols() {
        return Err(ChemError::Eigen(format!(
            "matrix is {}x{}, not square",
            matrix.nrows(),
            matrix.ncols()
        )));
    }
    if matrix.is_empty() {
        return Err(ChemError::Eigen("empty matrix".to_string()));
    }

    let eig = SymmetricEigen::new(matrix);
    let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));

    let eigenvalues: Vec<f64> = order.iter().map(|&i| eig.eigenvalues[i]).collect();
    let n = eigenvalues.len();
    let eigenvectors = DMatrix::from_fn(n, n, |r, c| eig.eigenvectors[(r, order[c])]);

    info!(dim = n, ground = eigenvalues[0], "diagonalized");
    Ok(Spectrum {
        eigenvalues,
        eigenvectors,
    })
}
