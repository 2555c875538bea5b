//! Restricted Hartree–Fock in an s-shell STO-3G basis.
//!
//! Supports H and He, one contracted 1s function per atom. All integrals
//! are closed-form Gaussian expressions (Szabo & Ostlund, appendix A):
//!
//! | integral           | primitive form                                         |
//! |--------------------|--------------------------------------------------------|
//! | overlap            | `(π/p)^{3/2} e^{−μR²}`                                 |
//! | kinetic            | `μ(3 − 2μR²)(π/p)^{3/2} e^{−μR²}`                      |
//! | nuclear attraction | `−(2π/p) Z e^{−μR²} F0(p·|P−C|²)`                      |
//! | repulsion          | `2π^{5/2}/(pq√(p+q)) e^{−μR²−νR'²} F0(pq/(p+q)·|P−Q|²)` |
//!
//! with `p = α+β`, `μ = αβ/p` and `P` the product centre.
//!
//! The molecular-orbital integrals of a converged run are returned as an
//! [`IntegralSet`] in chemist order.

use std::f64::consts::PI;

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array2, Array4};
use tracing::{debug, info};

use crate::error::{ChemError, ChemResult};
use crate::integrals::{EriConvention, IntegralSet};

/// Bohr per Ångström.
pub const BOHR_PER_ANGSTROM: f64 = 1.0 / 0.529177;

/// STO-3G 1s exponents for Slater exponent ζ = 1.
const STO3G_EXPONENTS: [f64; 3] = [2.227_660_584, 0.405_771_156, 0.109_817_510_4];
/// STO-3G 1s contraction coefficients.
const STO3G_COEFFS: [f64; 3] = [0.154_328_967, 0.535_328_142, 0.444_634_542];

fn slater_exponent(z: u32) -> ChemResult<f64> {
    match z {
        1 => Ok(1.24),
        2 => Ok(2.0925),
        other => Err(ChemError::UnsupportedElement(other)),
    }
}

/// A nucleus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// Atomic number.
    pub z: u32,
    /// Position in bohr.
    pub position: [f64; 3],
}

impl Atom {
    /// Atom at a position given in bohr.
    pub fn new(z: u32, position: [f64; 3]) -> Self {
        Self { z, position }
    }

    /// Atom at a position given in Ångström.
    pub fn from_angstrom(z: u32, position: [f64; 3]) -> Self {
        Self {
            z,
            position: position.map(|x| x * BOHR_PER_ANGSTROM),
        }
    }
}

/// A set of nuclei with a total charge.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    /// Nuclei.
    pub atoms: Vec<Atom>,
    /// Net charge; electrons = Σ Z − charge.
    pub charge: i32,
}

impl Molecule {
    /// Neutral molecule.
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms, charge: 0 }
    }

    /// Set the net charge.
    #[must_use]
    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    /// H₂ along z with the bond length in Ångström.
    pub fn h2(bond_angstrom: f64) -> Self {
        Self::new(vec![
            Atom::from_angstrom(1, [0.0, 0.0, 0.0]),
            Atom::from_angstrom(1, [0.0, 0.0, bond_angstrom]),
        ])
    }

    /// Electron count.
    pub fn n_electrons(&self) -> ChemResult<usize> {
        let total: i64 = self.atoms.iter().map(|a| i64::from(a.z)).sum::<i64>() - i64::from(self.charge);
        usize::try_from(total).map_err(|_| {
            ChemError::InvalidConfiguration(format!("charge {} leaves {total} electrons", self.charge))
        })
    }

    /// Σ Z_A Z_B / R_AB.
    pub fn nuclear_repulsion(&self) -> f64 {
        let mut e = 0.0;
        for (i, a) in self.atoms.iter().enumerate() {
            for b in &self.atoms[i + 1..] {
                e += f64::from(a.z * b.z) / dist2(a.position, b.position).sqrt();
            }
        }
        e
    }
}

/// Contracted s-type Gaussian.
#[derive(Debug, Clone)]
struct Contracted {
    center: [f64; 3],
    exponents: [f64; 3],
    /// Contraction coefficient times primitive normalization.
    weights: [f64; 3],
}

impl Contracted {
    fn sto3g(atom: &Atom) -> ChemResult<Self> {
        let zeta = slater_exponent(atom.z)?;
        let exponents = STO3G_EXPONENTS.map(|a| a * zeta * zeta);
        let weights = std::array::from_fn(|k| STO3G_COEFFS[k] * (2.0 * exponents[k] / PI).powf(0.75));
        Ok(Self {
            center: atom.position,
            exponents,
            weights,
        })
    }

    fn primitives(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.exponents.iter().copied().zip(self.weights.iter().copied())
    }
}

fn dist2(a: [f64; 3], b: [f64; 3]) -> f64 {
    (0..3).map(|i| (a[i] - b[i]).powi(2)).sum()
}

fn product_center(a: f64, ra: [f64; 3], b: f64, rb: [f64; 3]) -> [f64; 3] {
    let p = a + b;
    [0, 1, 2].map(|i| (a * ra[i] + b * rb[i]) / p)
}

/// Boys function of order zero.
pub fn boys_f0(t: f64) -> f64 {
    if t < 1e-12 {
        1.0 - t / 3.0
    } else {
        0.5 * (PI / t).sqrt() * libm::erf(t.sqrt())
    }
}

fn overlap(a: &Contracted, b: &Contracted) -> f64 {
    let r2 = dist2(a.center, b.center);
    let mut s = 0.0;
    for (al, wa) in a.primitives() {
        for (be, wb) in b.primitives() {
            let p = al + be;
            let mu = al * be / p;
            s += wa * wb * (PI / p).powf(1.5) * (-mu * r2).exp();
        }
    }
    s
}

fn kinetic(a: &Contracted, b: &Contracted) -> f64 {
    let r2 = dist2(a.center, b.center);
    let mut t = 0.0;
    for (al, wa) in a.primitives() {
        for (be, wb) in b.primitives() {
            let p = al + be;
            let mu = al * be / p;
            t += wa * wb * mu * (3.0 - 2.0 * mu * r2) * (PI / p).powf(1.5) * (-mu * r2).exp();
        }
    }
    t
}

fn nuclear_attraction(a: &Contracted, b: &Contracted, atoms: &[Atom]) -> f64 {
    let r2 = dist2(a.center, b.center);
    let mut v = 0.0;
    for (al, wa) in a.primitives() {
        for (be, wb) in b.primitives() {
            let p = al + be;
            let mu = al * be / p;
            let rp = product_center(al, a.center, be, b.center);
            let pre = -2.0 * PI / p * (-mu * r2).exp();
            for atom in atoms {
                v += wa * wb * pre * f64::from(atom.z) * boys_f0(p * dist2(rp, atom.position));
            }
        }
    }
    v
}

fn repulsion(a: &Contracted, b: &Contracted, c: &Contracted, d: &Contracted) -> f64 {
    let rab2 = dist2(a.center, b.center);
    let rcd2 = dist2(c.center, d.center);
    let mut g = 0.0;
    for (al, wa) in a.primitives() {
        for (be, wb) in b.primitives() {
            let p = al + be;
            let rp = product_center(al, a.center, be, b.center);
            let eab = (-al * be / p * rab2).exp();
            for (ga, wc) in c.primitives() {
                for (de, wd) in d.primitives() {
                    let q = ga + de;
                    let rq = product_center(ga, c.center, de, d.center);
                    let ecd = (-ga * de / q * rcd2).exp();
                    let pre = 2.0 * PI.powf(2.5) / (p * q * (p + q).sqrt());
                    g += wa * wb * wc * wd
                        * pre
                        * eab
                        * ecd
                        * boys_f0(p * q / (p + q) * dist2(rp, rq));
                }
            }
        }
    }
    g
}

/// Atomic-orbital integrals of a molecule.
#[derive(Debug, Clone)]
pub struct AoIntegrals {
    /// Overlap `S`.
    pub overlap: DMatrix<f64>,
    /// Core Hamiltonian `T + V`.
    pub core: DMatrix<f64>,
    /// `(μν|λσ)`.
    pub eri: Array4<f64>,
}

impl AoIntegrals {
    /// Evaluate every integral for `molecule` in STO-3G.
    pub fn compute(molecule: &Molecule) -> ChemResult<Self> {
        let basis: Vec<Contracted> = molecule
            .atoms
            .iter()
            .map(Contracted::sto3g)
            .collect::<ChemResult<_>>()?;
        let n = basis.len();

        let overlap = DMatrix::from_fn(n, n, |i, j| overlap(&basis[i], &basis[j]));
        let core = DMatrix::from_fn(n, n, |i, j| {
            kinetic(&basis[i], &basis[j]) + nuclear_attraction(&basis[i], &basis[j], &molecule.atoms)
        });
        let eri = Array4::from_shape_fn((n, n, n, n), |(i, j, k, l)| {
            repulsion(&basis[i], &basis[j], &basis[k], &basis[l])
        });

        Ok(Self { overlap, core, eri })
    }
}

/// A converged restricted Hartree–Fock solution.
#[derive(Debug, Clone)]
pub struct ScfOutcome {
    /// Electronic plus nuclear energy.
    pub total_energy: f64,
    /// Electronic energy.
    pub electronic_energy: f64,
    /// Nuclear repulsion.
    pub nuclear_repulsion: f64,
    /// Orbital energies, ascending.
    pub orbital_energies: Vec<f64>,
    /// MO coefficients; column i is orbital i.
    pub coefficients: DMatrix<f64>,
    /// Iterations used.
    pub iterations: usize,
    /// Electron count.
    pub n_electrons: usize,
    ao: AoIntegrals,
}

impl ScfOutcome {
    /// Transform the AO integrals into the MO basis.
    pub fn mo_integrals(&self) -> IntegralSet {
        let c = &self.coefficients;
        let n = c.ncols();
        let h = c.transpose() * &self.ao.core * c;
        let h1 = Array2::from_shape_fn((n, n), |(p, q)| h[(p, q)]);

        // four quarter transforms, one index at a time
        let ao = &self.ao.eri;
        let t1 = Array4::from_shape_fn((n, n, n, n), |(p, j, k, l)| {
            (0..n).map(|i| c[(i, p)] * ao[[i, j, k, l]]).sum::<f64>()
        });
        let t2 = Array4::from_shape_fn((n, n, n, n), |(p, q, k, l)| {
            (0..n).map(|j| c[(j, q)] * t1[[p, j, k, l]]).sum::<f64>()
        });
        let t3 = Array4::from_shape_fn((n, n, n, n), |(p, q, r, l)| {
            (0..n).map(|k| c[(k, r)] * t2[[p, q, k, l]]).sum::<f64>()
        });
        let eri = Array4::from_shape_fn((n, n, n, n), |(p, q, r, s)| {
            (0..n).map(|l| c[(l, s)] * t3[[p, q, r, l]]).sum::<f64>()
        });

        IntegralSet {
            h1,
            eri,
            n_orb: n,
            nelec: self.n_electrons,
            e_nuc: self.nuclear_repulsion,
            convention: EriConvention::Chemist,
        }
    }
}

/// Restricted Hartree–Fock driver.
#[derive(Debug, Clone)]
pub struct RestrictedHartreeFock {
    molecule: Molecule,
    max_iterations: usize,
    tolerance: f64,
}

impl RestrictedHartreeFock {
    /// Driver with 100 iterations and a 1e-10 density tolerance.
    pub fn new(molecule: Molecule) -> Self {
        Self {
            molecule,
            max_iterations: 100,
            tolerance: 1e-10,
        }
    }

    /// Set the iteration limit.
    #[must_use]
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Set the RMS density-change tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Run the SCF loop from a core-Hamiltonian guess.
    pub fn run(&self) -> ChemResult<ScfOutcome> {
        let n_electrons = self.molecule.n_electrons()?;
        if n_electrons % 2 != 0 {
            return Err(ChemError::InvalidConfiguration(format!(
                "restricted Hartree-Fock needs an even electron count, got {n_electrons}"
            )));
        }
        let n_occ = n_electrons / 2;
        let ao = AoIntegrals::compute(&self.molecule)?;
        let n = ao.overlap.nrows();
        if n_occ > n {
            return Err(ChemError::InvalidConfiguration(format!(
                "{n_electrons} electrons do not fit in {n} orbitals"
            )));
        }
        let x = inverse_sqrt(&ao.overlap)?;
        let e_nuc = self.molecule.nuclear_repulsion();

        let mut density = DMatrix::<f64>::zeros(n, n);
        let mut delta = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            let fock = &ao.core + two_electron(&density, &ao.eri);
            let (orbital_energies, coefficients) = solve_roothaan(&fock, &x);
            let next = closed_shell_density(&coefficients, n_occ);

            delta = ((&next - &density).norm_squared() / (n * n) as f64).sqrt();
            density = next;
            let electronic = electronic_energy(&density, &ao.core, &ao.eri);
            debug!(iteration, energy = electronic + e_nuc, delta, "scf");

            if delta < self.tolerance {
                info!(
                    iterations = iteration,
                    energy = electronic + e_nuc,
                    "scf converged"
                );
                return Ok(ScfOutcome {
                    total_energy: electronic + e_nuc,
                    electronic_energy: electronic,
                    nuclear_repulsion: e_nuc,
                    orbital_energies,
                    coefficients,
                    iterations: iteration,
                    n_electrons,
                    ao,
                });
            }
        }
        Err(ChemError::ScfNotConverged {
            iterations: self.max_iterations,
            delta,
        })
    }
}

/// `S^{-1/2}` by symmetric orthogonalization.
fn inverse_sqrt(s: &DMatrix<f64>) -> ChemResult<DMatrix<f64>> {
    let eig = SymmetricEigen::new(s.clone());
    if let Some(min) = eig.eigenvalues.iter().copied().reduce(f64::min) {
        if min <= 1e-10 {
            return Err(ChemError::Eigen(format!(
                "overlap matrix is singular (smallest eigenvalue {min:.3e})"
            )));
        }
    }
    let d = DMatrix::from_diagonal(&eig.eigenvalues.map(|v| 1.0 / v.sqrt()));
    Ok(&eig.eigenvectors * d * eig.eigenvectors.transpose())
}

/// `G_μν = Σ P_λσ [(μν|σλ) − ½(μλ|σν)]`.
fn two_electron(density: &DMatrix<f64>, eri: &Array4<f64>) -> DMatrix<f64> {
    let n = density.nrows();
    DMatrix::from_fn(n, n, |mu, nu| {
        let mut g = 0.0;
        for la in 0..n {
            for si in 0..n {
                g += density[(la, si)] * (eri[[mu, nu, si, la]] - 0.5 * eri[[mu, la, si, nu]]);
            }
        }
        g
    })
}

/// Diagonalize `F` in the orthogonal basis; returns ascending energies and AO
/// coefficients.
fn solve_roothaan(fock: &DMatrix<f64>, x: &DMatrix<f64>) -> (Vec<f64>, DMatrix<f64>) {
    let f_prime = x.transpose() * fock * x;
    let eig = SymmetricEigen::new(f_prime);
    let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));
    let n = order.len();
    let c_prime = DMatrix::from_fn(n, n, |r, c| eig.eigenvectors[(r, order[c])]);
    let energies = order.iter().map(|&i| eig.eigenvalues[i]).collect();
    (energies, x * c_prime)
}

fn closed_shell_density(c: &DMatrix<f64>, n_occ: usize) -> DMatrix<f64> {
    let n = c.nrows();
    DMatrix::from_fn(n, n, |mu, nu| {
        2.0 * (0..n_occ).map(|a| c[(mu, a)] * c[(nu, a)]).sum::<f64>()
    })
}

/// `½ Σ P_μν (H_μν + F_μν)`.
fn electronic_energy(density: &DMatrix<f64>, core: &DMatrix<f64>, eri: &Array4<f64>) -> f64 {
    let fock = core + two_electron(density, eri);
    0.5 * density.component_mul(&(core + &fock)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_boys_small_argument() {
        assert_relative_eq!(boys_f0(0.0), 1.0);
        assert_relative_eq!(boys_f0(1e-6), boys_f0(0.0), epsilon = 1e-6);
        // F0(1) = ½√π erf(1)
        assert_relative_eq!(boys_f0(1.0), 0.746_824_132_8, epsilon = 1e-9);
    }

    #[test]
    fn test_basis_is_normalized() {
        let atom = Atom::new(1, [0.0; 3]);
        let g = Contracted::sto3g(&atom).unwrap();
        assert_relative_eq!(overlap(&g, &g), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_h2_ao_integrals() {
        // Szabo & Ostlund table 3.5 values at R = 1.4 bohr
        let mol = Molecule::new(vec![Atom::new(1, [0.0; 3]), Atom::new(1, [0.0, 0.0, 1.4])]);
        let ao = AoIntegrals::compute(&mol).unwrap();
        assert_relative_eq!(ao.overlap[(0, 1)], 0.6593, epsilon = 1e-4);
        assert_relative_eq!(ao.core[(0, 0)], -1.1204, epsilon = 1e-4);
        assert_relative_eq!(ao.core[(0, 1)], -0.9584, epsilon = 1e-4);
        assert_relative_eq!(ao.eri[[0, 0, 0, 0]], 0.7746, epsilon = 1e-4);
        assert_relative_eq!(ao.eri[[0, 0, 1, 1]], 0.5697, epsilon = 1e-4);
    }

    #[test]
    fn test_unsupported_element() {
        let mol = Molecule::new(vec![Atom::new(3, [0.0; 3])]);
        assert!(matches!(
            AoIntegrals::compute(&mol),
            Err(ChemError::UnsupportedElement(3))
        ));
    }

    #[test]
    fn test_odd_electron_count_rejected() {
        let mol = Molecule::new(vec![Atom::new(1, [0.0; 3])]);
        assert!(RestrictedHartreeFock::new(mol).run().is_err());
    }

    #[test]
    fn test_iteration_limit() {
        let mol = Molecule::new(vec![Atom::new(1, [0.0; 3]), Atom::new(1, [0.0, 0.0, 1.4])]);
        let err = RestrictedHartreeFock::new(mol)
            .with_max_iterations(1)
            .with_tolerance(0.0)
            .run()
            .unwrap_err();
        assert!(matches!(err, ChemError::ScfNotConverged { iterations: 1, .. }));
    }
}
