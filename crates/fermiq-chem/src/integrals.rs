//! Molecular-orbital integrals and their on-disk format.
//!
//! An integral file is a flat JSON object of named arrays:
//!
//! ```json
//! { "h1": [[..], ..], "eri": [[[[..]]]], "n_orb": 2, "nelec": 2,
//!   "e_nuc": 0.714, "convention": "chemist" }
//! ```
//!
//! `e_nuc` and `convention` are optional. The four required keys are looked up
//! by name at load time, and a missing key fails with
//! [`ChemError::MissingField`].

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ndarray::{Array2, Array4};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChemError, ChemResult};

/// Index order of the two-electron tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EriConvention {
    /// `eri[p,q,r,s] = (pq|rs)`, as written by most SCF codes.
    #[default]
    Chemist,
    /// `eri[p,q,r,s] = <pq|rs>`.
    Physicist,
}

/// One- and two-electron integrals in an orthonormal orbital basis.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralSet {
    /// One-electron matrix `h[p,q]`.
    pub h1: Array2<f64>,
    /// Two-electron tensor in [`IntegralSet::convention`] order.
    pub eri: Array4<f64>,
    /// Number of spatial orbitals.
    pub n_orb: usize,
    /// Number of electrons.
    pub nelec: usize,
    /// Nuclear repulsion energy; zero when the source did not record it.
    pub e_nuc: f64,
    /// Index order of `eri`.
    pub convention: EriConvention,
}

impl IntegralSet {
    /// Build a chemist-ordered set, checking shapes against `h1`.
    pub fn new(h1: Array2<f64>, eri: Array4<f64>, nelec: usize) -> ChemResult<Self> {
        let n_orb = h1.nrows();
        let set = Self {
            h1,
            eri,
            n_orb,
            nelec,
            e_nuc: 0.0,
            convention: EriConvention::Chemist,
        };
        set.validate()?;
        Ok(set)
    }

    /// Attach a nuclear repulsion energy.
    #[must_use]
    pub fn with_nuclear_repulsion(mut self, e_nuc: f64) -> Self {
        self.e_nuc = e_nuc;
        self
    }

    /// Declare the index order of `eri`.
    #[must_use]
    pub fn with_convention(mut self, convention: EriConvention) -> Self {
        self.convention = convention;
        self
    }

    /// H₂ in STO-3G at R = 1.4 bohr, in the σg/σu MO basis.
    ///
    /// Values from Szabo & Ostlund, *Modern Quantum Chemistry*, §3.5.
    pub fn h2_reference() -> Self {
        let h1 = ndarray::arr2(&[[-1.2528, 0.0], [0.0, -0.4756]]);
        let mut eri = Array4::zeros((2, 2, 2, 2));
        eri[[0, 0, 0, 0]] = 0.6746;
        eri[[1, 1, 1, 1]] = 0.6975;
        eri[[0, 0, 1, 1]] = 0.6636;
        eri[[1, 1, 0, 0]] = 0.6636;
        for idx in [[0, 1, 0, 1], [0, 1, 1, 0], [1, 0, 0, 1], [1, 0, 1, 0]] {
            eri[idx] = 0.1813;
        }
        Self {
            h1,
            eri,
            n_orb: 2,
            nelec: 2,
            e_nuc: 1.0 / 1.4,
            convention: EriConvention::Chemist,
        }
    }

    /// Two-electron tensor as `(pq|rs)`.
    pub fn chemist_eri(&self) -> Array4<f64> {
        match self.convention {
            EriConvention::Chemist => self.eri.clone(),
            EriConvention::Physicist => swap_inner(&self.eri),
        }
    }

    /// Two-electron tensor as `<pq|rs> = (pr|qs)`.
    pub fn physicist_eri(&self) -> Array4<f64> {
        match self.convention {
            EriConvention::Chemist => swap_inner(&self.eri),
            EriConvention::Physicist => self.eri.clone(),
        }
    }

    /// Check the standard real-orbital permutation symmetries.
    ///
    /// `h[p,q] = h[q,p]` and `(pq|rs) = (qp|rs) = (pq|sr) = (rs|pq)`.
    /// Nothing downstream enforces these; asymmetric input just yields a
    /// non-Hermitian qubit Hamiltonian.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.n_orb;
        for p in 0..n {
            for q in 0..n {
                if (self.h1[[p, q]] - self.h1[[q, p]]).abs() > tol {
                    return false;
                }
            }
        }
        let eri = self.chemist_eri();
        for p in 0..n {
            for q in 0..n {
                for r in 0..n {
                    for s in 0..n {
                        let v = eri[[p, q, r, s]];
                        if (v - eri[[q, p, r, s]]).abs() > tol
                            || (v - eri[[p, q, s, r]]).abs() > tol
                            || (v - eri[[r, s, p, q]]).abs() > tol
                        {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Load an integral file.
    pub fn load(path: impl AsRef<Path>) -> ChemResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;

        let h1: Vec<Vec<f64>> = serde_json::from_value(field(&value, "h1")?.clone())?;
        let eri: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(field(&value, "eri")?.clone())?;
        let n_orb: usize = serde_json::from_value(field(&value, "n_orb")?.clone())?;
        let nelec: usize = serde_json::from_value(field(&value, "nelec")?.clone())?;
        let e_nuc = match value.get("e_nuc") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => 0.0,
        };
        let convention = match value.get("convention") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => EriConvention::Chemist,
        };

        let set = Self {
            h1: matrix_from_rows(h1, n_orb)?,
            eri: tensor_from_nested(eri, n_orb)?,
            n_orb,
            nelec,
            e_nuc,
            convention,
        };
        set.validate()?;
        debug!(path = %path.display(), n_orb, nelec, "loaded integrals");
        Ok(set)
    }

    /// Write the set as a named-array JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> ChemResult<()> {
        let h1: Vec<Vec<f64>> = self.h1.rows().into_iter().map(|r| r.to_vec()).collect();
        let n = self.n_orb;
        let eri: Vec<Vec<Vec<Vec<f64>>>> = (0..n)
            .map(|p| {
                (0..n)
                    .map(|q| {
                        (0..n)
                            .map(|r| (0..n).map(|s| self.eri[[p, q, r, s]]).collect())
                            .collect()
                    })
                    .collect()
            })
            .collect();
        let doc = serde_json::json!({
            "h1": h1,
            "eri": eri,
            "n_orb": self.n_orb,
            "nelec": self.nelec,
            "e_nuc": self.e_nuc,
            "convention": self.convention,
        });
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer_pretty(writer, &doc)?;
        Ok(())
    }

    fn validate(&self) -> ChemResult<()> {
        let n = self.n_orb;
        if self.h1.dim() != (n, n) {
            return Err(ChemError::ShapeMismatch {
                what: "h1",
                expected: vec![n, n],
                found: self.h1.shape().to_vec(),
            });
        }
        if self.eri.dim() != (n, n, n, n) {
            return Err(ChemError::ShapeMismatch {
                what: "eri",
                expected: vec![n, n, n, n],
                found: self.eri.shape().to_vec(),
            });
        }
        Ok(())
    }
}

fn field<'a>(value: &'a Value, key: &str) -> ChemResult<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| ChemError::MissingField(key.to_string()))
}

/// `out[p,q,r,s] = eri[p,r,q,s]`; converts between chemist and physicist order.
fn swap_inner(eri: &Array4<f64>) -> Array4<f64> {
    eri.view().permuted_axes([0, 2, 1, 3]).to_owned()
}

fn matrix_from_rows(rows: Vec<Vec<f64>>, n: usize) -> ChemResult<Array2<f64>> {
    let found_cols = rows.first().map_or(0, Vec::len);
    if rows.len() != n || rows.iter().any(|r| r.len() != n) {
        return Err(ChemError::ShapeMismatch {
            what: "h1",
            expected: vec![n, n],
            found: vec![rows.len(), found_cols],
        });
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n, n), flat).map_err(|_| ChemError::ShapeMismatch {
        what: "h1",
        expected: vec![n, n],
        found: vec![n, found_cols],
    })
}

fn tensor_from_nested(nested: Vec<Vec<Vec<Vec<f64>>>>, n: usize) -> ChemResult<Array4<f64>> {
    let well_formed = nested.len() == n
        && nested.iter().all(|a| {
            a.len() == n && a.iter().all(|b| b.len() == n && b.iter().all(|c| c.len() == n))
        });
    if !well_formed {
        return Err(ChemError::ShapeMismatch {
            what: "eri",
            expected: vec![n, n, n, n],
            found: vec![nested.len()],
        });
    }
    let flat: Vec<f64> = nested.into_iter().flatten().flatten().flatten().collect();
    Array4::from_shape_vec((n, n, n, n), flat).map_err(|_| ChemError::ShapeMismatch {
        what: "eri",
        expected: vec![n, n, n, n],
        found: vec![n],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_set_is_symmetric() {
        let set = IntegralSet::h2_reference();
        assert_eq!(set.n_orb, 2);
        assert_eq!(set.nelec, 2);
        assert!(set.is_symmetric(1e-12));
    }

    #[test]
    fn test_convention_swap() {
        let set = IntegralSet::h2_reference();
        let phys = set.physicist_eri();
        // <01|01> = (00|11) = J12
        assert_eq!(phys[[0, 1, 0, 1]], 0.6636);
        // <01|10> = (01|10) = K12
        assert_eq!(phys[[0, 1, 1, 0]], 0.1813);

        let back = set.clone().with_convention(EriConvention::Physicist);
        let mut as_phys = back.clone();
        as_phys.eri = phys;
        assert_eq!(as_phys.chemist_eri(), set.eri);
    }

    #[test]
    fn test_asymmetric_h1_detected() {
        let mut set = IntegralSet::h2_reference();
        set.h1[[0, 1]] = 0.3;
        assert!(!set.is_symmetric(1e-9));
    }

    #[test]
    fn test_new_rejects_bad_eri_shape() {
        let h1 = Array2::zeros((2, 2));
        let eri = Array4::zeros((2, 2, 2, 3));
        let err = IntegralSet::new(h1, eri, 2).unwrap_err();
        assert!(matches!(err, ChemError::ShapeMismatch { what: "eri", .. }));
    }
}
