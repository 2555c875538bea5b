//! Projection of a qubit operator onto a truncated configuration basis.
//!
//! Each Pauli term acts on a column configuration by walking its
//! `(qubit, op)` pairs in qubit order:
//!
//! - `Z` multiplies the phase by `(−1)^bit` of the current copy;
//! - `X` flips the bit;
//! - `Y` flips the bit and multiplies the phase by `+i` when the column's
//!   pre-flip bit is 0 and `−i` when it is 1.
//!
//! The term contributes `coeff · phase` to entry `(row, col)` when the image
//! equals the row configuration. The matrix is not symmetrized.

use nalgebra::DMatrix;
use num_complex::Complex64;
use tracing::debug;

use crate::configuration::{ConfigurationBasis, configuration_index, generate_configurations};
use crate::error::{ChemError, ChemResult};
use crate::qubit::{PauliOp, PauliString, QubitOperator};

const I: Complex64 = Complex64::new(0.0, 1.0);

/// Image of `column` under `pauli`, with its phase.
fn act(pauli: &PauliString, column: &[u8]) -> ChemResult<(Vec<u8>, Complex64)> {
    let mut image = column.to_vec();
    let mut phase = Complex64::new(1.0, 0.0);
    for &(q, op) in pauli.ops() {
        let q = q as usize;
        let Some(bit) = image.get_mut(q) else {
            return Err(ChemError::QubitOutOfRange {
                qubit: q,
                n_qubits: column.len(),
            });
        };
        match op {
            PauliOp::I => {}
            PauliOp::Z => {
                if *bit == 1 {
                    phase = -phase;
                }
            }
            PauliOp::X => *bit ^= 1,
            PauliOp::Y => {
                phase *= if column[q] == 0 { I } else { -I };
                *bit ^= 1;
            }
        }
    }
    Ok((image, phase))
}

/// `<row| H |column>` for a single pair of configurations.
pub fn matrix_element(h: &QubitOperator, row: &[u8], column: &[u8]) -> ChemResult<Complex64> {
    let mut acc = Complex64::new(0.0, 0.0);
    for (pauli, &coeff) in h.iter() {
        let (image, phase) = act(pauli, column)?;
        if image == row {
            acc += coeff * phase;
        }
    }
    Ok(acc)
}

/// Project `h` onto `basis`.
///
/// Equivalent to [`matrix_element`] over every `(row, col)` pair, but each
/// term is applied to each column once and the image row looked up in the
/// basis index.
pub fn project_hamiltonian(
    h: &QubitOperator,
    basis: &ConfigurationBasis,
) -> ChemResult<DMatrix<Complex64>> {
    let n = basis.len();
    let mut m = DMatrix::<Complex64>::zeros(n, n);
    for (col, column) in basis.configs().iter().enumerate() {
        for (pauli, &coeff) in h.iter() {
            let (image, phase) = act(pauli, column)?;
            if let Some(row) = basis.index_of(&image) {
                m[(row, col)] += coeff * phase;
            }
        }
    }
    debug!(dim = n, n_terms = h.n_terms(), "projected Hamiltonian");
    Ok(m)
}

/// Fixed-particle block of a dense `2^n` matrix, in
/// [`generate_configurations`] order.
pub fn particle_sector(dense: &DMatrix<Complex64>, n: usize, k: usize) -> DMatrix<Complex64> {
    let idx: Vec<usize> = generate_configurations(n, k)
        .iter()
        .map(|c| configuration_index(c))
        .collect();
    DMatrix::from_fn(idx.len(), idx.len(), |r, c| dense[(idx[r], idx[c])])
}
