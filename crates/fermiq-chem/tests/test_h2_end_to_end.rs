//! H₂ in STO-3G, from integrals to the ground-state energy.

use approx::assert_relative_eq;
use fermiq_chem::configuration::ConfigurationBasis;
use fermiq_chem::fermion::{DEFAULT_CUTOFF, SpinMode, molecular_hamiltonian};
use fermiq_chem::integrals::IntegralSet;
use fermiq_chem::jordan_wigner::jordan_wigner;
use fermiq_chem::projection::{particle_sector, project_hamiltonian};
use fermiq_chem::qubit::QubitOperator;
use fermiq_chem::solver::diagonalize;

/// Lowest root of the 2×2 CI between σg² and σu².
fn closed_form_ci(ints: &IntegralSet) -> f64 {
    let h11 = ints.h1[[0, 0]];
    let h22 = ints.h1[[1, 1]];
    let j11 = ints.eri[[0, 0, 0, 0]];
    let j22 = ints.eri[[1, 1, 1, 1]];
    let k12 = ints.eri[[0, 1, 0, 1]];
    let a = 2.0 * h11 + j11;
    let d = 2.0 * h22 + j22;
    0.5 * (a + d) - (0.25 * (a - d).powi(2) + k12 * k12).sqrt()
}

fn h2_qubit_hamiltonian(e_nuc: bool) -> (IntegralSet, QubitOperator) {
    let mut ints = IntegralSet::h2_reference();
    if !e_nuc {
        ints.e_nuc = 0.0;
    }
    let h = jordan_wigner(&molecular_hamiltonian(
        &ints,
        SpinMode::SpinOrbital,
        DEFAULT_CUTOFF,
    ));
    (ints, h)
}

// ---------------------------------------------------------------------------
// Projected ground state
// ---------------------------------------------------------------------------

#[test]
fn electronic_ground_state_matches_two_by_two_ci() {
    let (ints, h) = h2_qubit_hamiltonian(false);
    let basis = ConfigurationBasis::fixed_particle(4, 2);
    assert_eq!(basis.len(), 6);

    let spectrum = diagonalize(project_hamiltonian(&h, &basis).unwrap()).unwrap();
    assert_relative_eq!(spectrum.ground_energy(), closed_form_ci(&ints), epsilon = 1e-6);
    assert_relative_eq!(spectrum.ground_energy(), -1.851_571, epsilon = 1e-5);
}

#[test]
fn total_ground_state_includes_nuclear_repulsion() {
    let (_, h) = h2_qubit_hamiltonian(true);
    let basis = ConfigurationBasis::fixed_particle(4, 2);
    let spectrum = diagonalize(project_hamiltonian(&h, &basis).unwrap()).unwrap();
    assert_relative_eq!(spectrum.ground_energy(), -1.1373, epsilon = 1e-4);
}

#[test]
fn dominant_configuration_is_bonding_pair() {
    let (_, h) = h2_qubit_hamiltonian(true);
    let basis = ConfigurationBasis::fixed_particle(4, 2);
    let spectrum = diagonalize(project_hamiltonian(&h, &basis).unwrap()).unwrap();
    assert_eq!(spectrum.dominant_configuration(&basis), Some(&[1u8, 1, 0, 0][..]));
}

#[test]
fn projected_matrix_is_hermitian() {
    let (_, h) = h2_qubit_hamiltonian(true);
    let basis = ConfigurationBasis::fixed_particle(4, 2);
    let m = project_hamiltonian(&h, &basis).unwrap();
    for r in 0..m.nrows() {
        for c in 0..m.ncols() {
            assert!((m[(r, c)] - m[(c, r)].conj()).norm() < 1e-12);
        }
    }
}

// ---------------------------------------------------------------------------
// Cross-check against the untruncated qubit Hamiltonian
// ---------------------------------------------------------------------------

#[test]
fn projection_agrees_with_full_particle_sector() {
    let (_, h) = h2_qubit_hamiltonian(true);
    let dense = h.to_dense(4).unwrap();
    let sector = particle_sector(&dense, 4, 2);
    let basis = ConfigurationBasis::fixed_particle(4, 2);
    let projected = project_hamiltonian(&h, &basis).unwrap();

    assert_relative_eq!(
        diagonalize(projected).unwrap().ground_energy(),
        diagonalize(sector).unwrap().ground_energy(),
        epsilon = 1e-10
    );
}

#[test]
fn full_spectrum_ground_state_is_two_electron() {
    // the neutral molecule is the global ground state of the Fock space
    let (_, h) = h2_qubit_hamiltonian(true);
    let full = diagonalize(h.to_dense(4).unwrap()).unwrap();
    assert_relative_eq!(full.ground_energy(), -1.1373, epsilon = 1e-4);
}

#[test]
fn spatial_mode_projection_is_consistent() {
    let ints = IntegralSet::h2_reference();
    let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::Spatial, DEFAULT_CUTOFF));
    assert_eq!(h.n_qubits(), 2);
    let basis = ConfigurationBasis::fixed_particle(2, 1);
    let projected = diagonalize(project_hamiltonian(&h, &basis).unwrap()).unwrap();
    let sector = diagonalize(particle_sector(&h.to_dense(2).unwrap(), 2, 1)).unwrap();
    assert_relative_eq!(projected.ground_energy(), sector.ground_energy(), epsilon = 1e-12);
}

#[test]
fn empty_basis_is_rejected_by_solver() {
    let (_, h) = h2_qubit_hamiltonian(true);
    let basis = ConfigurationBasis::fixed_particle(4, 5);
    assert!(basis.is_empty());
    let m = project_hamiltonian(&h, &basis).unwrap();
    assert!(diagonalize(m).is_err());
}
