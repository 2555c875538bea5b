//! Pauli strings and qubit operators.
//!
//! A qubit operator is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℂ.
//!
//! # Example
//!
//! ```rust
//! use fermiq_chem::qubit::{PauliOp, PauliString, QubitOperator};
//! use num_complex::Complex64;
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let mut h = QubitOperator::new();
//! h.add_term(PauliString::from_ops([(0, PauliOp::Z), (1, PauliOp::Z)]), Complex64::new(-1.0, 0.0));
//! h.add_term(PauliString::from_ops([(0, PauliOp::X)]), Complex64::new(0.5, 0.0));
//! assert_eq!(h.n_terms(), 2);
//! assert!(h.is_hermitian(1e-12));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{ChemError, ChemResult};

const I: Complex64 = Complex64::new(0.0, 1.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity; never stored inside a [`PauliString`].
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Product `self · other` as `(phase, op)`.
    pub fn mul(self, other: Self) -> (Complex64, Self) {
        use PauliOp::{I as Id, X, Y, Z};
        match (self, other) {
            (Id, p) | (p, Id) => (ONE, p),
            (X, X) | (Y, Y) | (Z, Z) => (ONE, Id),
            (X, Y) => (I, Z),
            (Y, X) => (-I, Z),
            (Y, Z) => (I, X),
            (Z, Y) => (-I, X),
            (Z, X) => (I, Y),
            (X, Z) => (-I, Y),
        }
    }

    fn symbol(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// The empty (identity) string.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    /// A qubit listed twice is multiplied out and the phase discarded, so
    /// callers that care about the phase should go through [`PauliString::mul`].
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        ops.into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .fold(Self::identity(), |acc, (q, op)| {
                acc.mul(&Self { ops: vec![(q, op)] }).1
            })
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Product `self · other` as `(phase, string)`.
    pub fn mul(&self, other: &Self) -> (Complex64, Self) {
        let mut phase = ONE;
        let mut out = Vec::with_capacity(self.ops.len() + other.ops.len());
        let (mut i, mut j) = (0, 0);
        while i < self.ops.len() && j < other.ops.len() {
            let (qa, pa) = self.ops[i];
            let (qb, pb) = other.ops[j];
            if qa < qb {
                out.push((qa, pa));
                i += 1;
            } else if qb < qa {
                out.push((qb, pb));
                j += 1;
            } else {
                let (p, op) = pa.mul(pb);
                phase *= p;
                if op != PauliOp::I {
                    out.push((qa, op));
                }
                i += 1;
                j += 1;
            }
        }
        out.extend_from_slice(&self.ops[i..]);
        out.extend_from_slice(&other.ops[j..]);
        (phase, Self { ops: out })
    }

    /// Act on computational basis state `index` (bit q is qubit q).
    ///
    /// Returns the image index and the accumulated phase.
    pub fn apply_to_index(&self, index: usize) -> (usize, Complex64) {
        let mut out = index;
        let mut phase = ONE;
        for &(q, op) in &self.ops {
            let mask = 1usize << q;
            let bit = index & mask != 0;
            match op {
                PauliOp::I => {}
                PauliOp::X => out ^= mask,
                PauliOp::Y => {
                    out ^= mask;
                    phase *= if bit { -I } else { I };
                }
                PauliOp::Z => {
                    if bit {
                        phase = -phase;
                    }
                }
            }
        }
        (out, phase)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "I");
        }
        for (k, (q, op)) in self.ops.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", op.symbol(), q)?;
        }
        Ok(())
    }
}

/// A complex-weighted sum of Pauli strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QubitOperator {
    terms: BTreeMap<PauliString, Complex64>,
}

impl QubitOperator {
    /// The zero operator.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single weighted term.
    pub fn from_term(pauli: PauliString, coeff: Complex64) -> Self {
        let mut op = Self::new();
        op.add_term(pauli, coeff);
        op
    }

    /// `coeff · I`.
    pub fn identity(coeff: Complex64) -> Self {
        Self::from_term(PauliString::identity(), coeff)
    }

    /// Add `coeff · pauli`, merging with an existing term.
    pub fn add_term(&mut self, pauli: PauliString, coeff: Complex64) {
        *self.terms.entry(pauli).or_insert(Complex64::new(0.0, 0.0)) += coeff;
    }

    /// Terms in Pauli-string order.
    pub fn iter(&self) -> impl Iterator<Item = (&PauliString, &Complex64)> {
        self.terms.iter()
    }

    /// Coefficient of `pauli`, if present.
    pub fn coefficient(&self, pauli: &PauliString) -> Option<Complex64> {
        self.terms.get(pauli).copied()
    }

    /// Number of stored terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if no terms are stored.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The minimum number of qubits required to represent this operator.
    pub fn n_qubits(&self) -> usize {
        self.terms
            .keys()
            .filter_map(PauliString::max_qubit)
            .max()
            .map_or(0, |q| q as usize + 1)
    }

    /// Drop terms whose coefficient magnitude is at most `tol`.
    pub fn compress(&mut self, tol: f64) {
        self.terms.retain(|_, c| c.norm() > tol);
    }

    /// True if every coefficient is real to within `tol`.
    ///
    /// Pauli strings are Hermitian, so this is exactly Hermiticity of the sum.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.terms.values().all(|c| c.im.abs() <= tol)
    }

    /// Dense `2^n × 2^n` matrix; bit q of a basis index is qubit q.
    pub fn to_dense(&self, n_qubits: usize) -> ChemResult<DMatrix<Complex64>> {
        if let Some(q) = self.n_qubits().checked_sub(1).filter(|&q| q >= n_qubits) {
            return Err(ChemError::QubitOutOfRange { qubit: q, n_qubits });
        }
        let dim = 1usize << n_qubits;
        let mut m = DMatrix::<Complex64>::zeros(dim, dim);
        for (pauli, &coeff) in &self.terms {
            for col in 0..dim {
                let (row, phase) = pauli.apply_to_index(col);
                m[(row, col)] += coeff * phase;
            }
        }
        Ok(m)
    }
}

impl AddAssign<&QubitOperator> for QubitOperator {
    fn add_assign(&mut self, rhs: &QubitOperator) {
        for (p, &c) in &rhs.terms {
            self.add_term(p.clone(), c);
        }
    }
}

impl Add for QubitOperator {
    type Output = QubitOperator;

    fn add(mut self, rhs: QubitOperator) -> QubitOperator {
        self += &rhs;
        self
    }
}

impl Mul for &QubitOperator {
    type Output = QubitOperator;

    fn mul(self, rhs: &QubitOperator) -> QubitOperator {
        let mut out = QubitOperator::new();
        for (pa, &ca) in &self.terms {
            for (pb, &cb) in &rhs.terms {
                let (phase, p) = pa.mul(pb);
                out.add_term(p, ca * cb * phase);
            }
        }
        out
    }
}

impl Mul<Complex64> for QubitOperator {
    type Output = QubitOperator;

    fn mul(mut self, rhs: Complex64) -> QubitOperator {
        for c in self.terms.values_mut() {
            *c *= rhs;
        }
        self
    }
}

impl fmt::Display for QubitOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, c) in &self.terms {
            writeln!(f, "({:+.8}{:+.8}i) [{}]", c.re, c.im, p)?;
        }
        Ok(())
    }
}
