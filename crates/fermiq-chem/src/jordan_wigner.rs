//! Jordan–Wigner mapping from fermionic to qubit operators.
//!
//! Mode p maps to qubit p with a Z string on every lower qubit:
//!
//!   a†_p = ½ (X_p − iY_p) Z_{p−1} … Z_0
//!   a_p  = ½ (X_p + iY_p) Z_{p−1} … Z_0

use std::collections::HashMap;

use num_complex::Complex64;
use tracing::{debug, warn};

use crate::fermion::{FermionOperator, Ladder, LadderOp};
use crate::qubit::{PauliOp, PauliString, QubitOperator};

/// Coefficients at or below this magnitude are dropped from the image.
pub const COMPRESS_TOL: f64 = 1e-12;

/// Image of a single ladder operator.
pub fn ladder_image(op: LadderOp) -> QubitOperator {
    let parity = (0..op.mode).map(|q| (q, PauliOp::Z));
    let x = PauliString::from_ops(parity.clone().chain([(op.mode, PauliOp::X)]));
    let y = PauliString::from_ops(parity.chain([(op.mode, PauliOp::Y)]));
    let y_sign = match op.action {
        Ladder::Create => -0.5,
        Ladder::Annihilate => 0.5,
    };
    let mut image = QubitOperator::from_term(x, Complex64::new(0.5, 0.0));
    image.add_term(y, Complex64::new(0.0, y_sign));
    image
}

/// Map a fermionic operator to a qubit operator.
pub fn jordan_wigner(op: &FermionOperator) -> QubitOperator {
    let mut cache: HashMap<LadderOp, QubitOperator> = HashMap::new();
    let mut out = QubitOperator::new();

    for (ops, coeff) in op.iter() {
        let mut term = QubitOperator::identity(Complex64::new(coeff, 0.0));
        for &ladder in ops {
            let image = &*cache.entry(ladder).or_insert_with(|| ladder_image(ladder));
            term = &term * image;
        }
        out += &term;
    }
    out.compress(COMPRESS_TOL);

    if !out.is_hermitian(1e-9) {
        warn!("Jordan-Wigner image has complex coefficients; input is not Hermitian");
    }
    debug!(n_terms = out.n_terms(), n_qubits = out.n_qubits(), "Jordan-Wigner mapping done");
    out
}
