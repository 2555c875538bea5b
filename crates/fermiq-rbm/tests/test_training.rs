//! Stochastic-reconfiguration training on H₂.

use fermiq_chem::{
    ConfigurationBasis, IntegralSet, SpinMode, diagonalize, jordan_wigner, molecular_hamiltonian,
    project_hamiltonian,
};
use fermiq_rbm::sr::real_part;
use fermiq_rbm::{
    Rbm, RbmError, SrConfig, StochasticReconfiguration, variational_energy, visible_matrix,
};
use nalgebra::DMatrix;
use num_complex::Complex64;

fn h2_projected(mode: SpinMode) -> (DMatrix<Complex64>, ConfigurationBasis) {
    let ints = IntegralSet::h2_reference();
    let h = jordan_wigner(&molecular_hamiltonian(&ints, mode, 1e-12));
    let n_modes = mode.n_modes(ints.n_orb);
    let basis = ConfigurationBasis::fixed_particle(n_modes, ints.nelec.min(n_modes));
    (project_hamiltonian(&h, &basis).unwrap(), basis)
}

#[test]
fn trace_has_one_entry_per_epoch() {
    let (h, basis) = h2_projected(SpinMode::SpinOrbital);
    let mut rbm = Rbm::new(4, 4);
    let trainer = StochasticReconfiguration::new(SrConfig {
        epochs: 17,
        ..SrConfig::default()
    });
    let trace = trainer.train_projected(&mut rbm, &h, &basis, |_, _| {}).unwrap();
    assert_eq!(trace.len(), 17);
    assert!(trace.energies.iter().all(|e| e.is_finite()));
}

#[test]
fn energies_are_bounded_by_ground_state() {
    let (h, basis) = h2_projected(SpinMode::SpinOrbital);
    let ground = diagonalize(h.clone()).unwrap().ground_energy();

    let mut rbm = Rbm::new(4, 4);
    let trace = StochasticReconfiguration::new(SrConfig {
        epochs: 60,
        learning_rate: 0.01,
        diag_shift: 0.01,
    })
    .train_projected(&mut rbm, &h, &basis, |_, _| {})
    .unwrap();

    for e in &trace.energies {
        assert!(*e >= ground - 1e-8, "energy {e} below ground state {ground}");
    }
}

#[test]
fn small_steps_lower_the_energy() {
    let (h, basis) = h2_projected(SpinMode::SpinOrbital);
    let mut rbm = Rbm::new(4, 4);
    let trace = StochasticReconfiguration::new(SrConfig {
        epochs: 50,
        learning_rate: 0.001,
        diag_shift: 0.1,
    })
    .train_projected(&mut rbm, &h, &basis, |_, _| {})
    .unwrap();

    let first = trace.energies[0];
    let last = trace.final_energy().unwrap();
    assert!(last < first, "energy rose from {first} to {last}");
}

#[test]
fn callback_sees_every_epoch() {
    let (h, basis) = h2_projected(SpinMode::SpinOrbital);
    let mut rbm = Rbm::new(4, 2);
    let mut seen = Vec::new();
    let trace = StochasticReconfiguration::new(SrConfig {
        epochs: 5,
        ..SrConfig::default()
    })
    .train_projected(&mut rbm, &h, &basis, |epoch, e| seen.push((epoch, e)))
    .unwrap();
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[4].0, 4);
    assert_eq!(seen[4].1, trace.energies[4]);
}

#[test]
fn first_energy_matches_variational_energy() {
    let (h, basis) = h2_projected(SpinMode::SpinOrbital);
    let rbm = Rbm::new(4, 4);
    let expected = variational_energy(&rbm, &real_part(&h), &visible_matrix(&basis));

    let mut trained = rbm.clone();
    let trace = StochasticReconfiguration::new(SrConfig {
        epochs: 1,
        ..SrConfig::default()
    })
    .train_projected(&mut trained, &h, &basis, |_, _| {})
    .unwrap();
    assert_eq!(trace.energies[0], expected);
    assert_ne!(trained, rbm);
}

#[test]
fn spatial_mode_trains_on_two_sites() {
    let (h, basis) = h2_projected(SpinMode::Spatial);
    assert_eq!(basis.len(), 1);
    let mut rbm = Rbm::new(2, 2);
    let trace = StochasticReconfiguration::default()
        .train_projected(&mut rbm, &h, &basis, |_, _| {})
        .unwrap();
    // one configuration: every wavefunction gives the same energy
    let e0 = trace.energies[0];
    assert!(trace.energies.iter().all(|e| (e - e0).abs() < 1e-12));
}

#[test]
fn train_projects_qubit_operator() {
    let ints = IntegralSet::h2_reference();
    let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::SpinOrbital, 1e-12));
    let basis = ConfigurationBasis::fixed_particle(4, 2);
    let mut rbm = Rbm::new(4, 4);
    let trace = StochasticReconfiguration::new(SrConfig {
        epochs: 3,
        ..SrConfig::default()
    })
    .train(&mut rbm, &h, &basis)
    .unwrap();
    assert_eq!(trace.len(), 3);
}

#[test]
fn mismatched_visible_layer_is_rejected() {
    let (h, basis) = h2_projected(SpinMode::SpinOrbital);
    let mut rbm = Rbm::new(3, 3);
    let err = StochasticReconfiguration::default()
        .train_projected(&mut rbm, &h, &basis, |_, _| {})
        .unwrap_err();
    assert!(matches!(err, RbmError::ShapeMismatch { what: "visible layer", .. }));
}

#[test]
fn mismatched_hamiltonian_is_rejected() {
    let (_, basis) = h2_projected(SpinMode::SpinOrbital);
    let mut rbm = Rbm::new(4, 4);
    let h = DMatrix::<Complex64>::zeros(3, 3);
    let err = StochasticReconfiguration::default()
        .train_projected(&mut rbm, &h, &basis, |_, _| {})
        .unwrap_err();
    assert!(matches!(err, RbmError::ShapeMismatch { what: "hamiltonian", .. }));
}

#[test]
fn empty_basis_is_rejected() {
    let ints = IntegralSet::h2_reference();
    let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::SpinOrbital, 1e-12));
    let basis = ConfigurationBasis::fixed_particle(4, 5);
    assert!(basis.is_empty());
    let mut rbm = Rbm::new(4, 4);
    let result = StochasticReconfiguration::new(SrConfig {
        epochs: 3,
        ..SrConfig::default()
    })
    .train(&mut rbm, &h, &basis);
    assert!(matches!(result, Err(RbmError::EmptyBasis)));
}
