//! Property-based tests for configuration bases and qubit Hamiltonians.

use std::collections::HashSet;

use fermiq_chem::configuration::{binomial, generate_configurations};
use fermiq_chem::fermion::{DEFAULT_CUTOFF, SpinMode, molecular_hamiltonian};
use fermiq_chem::integrals::IntegralSet;
use fermiq_chem::jordan_wigner::jordan_wigner;
use ndarray::{Array2, Array4};
use proptest::prelude::*;

/// Random real integrals with the eight-fold permutation symmetry.
fn arb_symmetric_integrals(n: usize) -> impl Strategy<Value = IntegralSet> {
    (
        prop::collection::vec(-1.0f64..1.0, n * n),
        prop::collection::vec(-0.5f64..0.5, n * n * n * n),
    )
        .prop_map(move |(h, g)| {
            let raw_h = Array2::from_shape_vec((n, n), h).unwrap();
            let h1 = Array2::from_shape_fn((n, n), |(p, q)| 0.5 * (raw_h[[p, q]] + raw_h[[q, p]]));
            let raw_g = Array4::from_shape_vec((n, n, n, n), g).unwrap();
            let eri = Array4::from_shape_fn((n, n, n, n), |(p, q, r, s)| {
                (raw_g[[p, q, r, s]]
                    + raw_g[[q, p, r, s]]
                    + raw_g[[p, q, s, r]]
                    + raw_g[[q, p, s, r]]
                    + raw_g[[r, s, p, q]]
                    + raw_g[[s, r, p, q]]
                    + raw_g[[r, s, q, p]]
                    + raw_g[[s, r, q, p]])
                    / 8.0
            });
            IntegralSet::new(h1, eri, 2).unwrap()
        })
}

proptest! {
    #[test]
    fn configurations_are_complete_and_distinct(n in 0usize..=10, k in 0usize..=10) {
        let configs = generate_configurations(n, k);
        prop_assert_eq!(configs.len(), binomial(n, k));

        let unique: HashSet<&Vec<u8>> = configs.iter().collect();
        prop_assert_eq!(unique.len(), configs.len());
        for c in &configs {
            prop_assert_eq!(c.len(), n);
            prop_assert_eq!(c.iter().filter(|&&b| b == 1).count(), k);
            prop_assert!(c.iter().all(|&b| b <= 1));
        }
    }

    #[test]
    fn configurations_are_sorted_descending_as_bit_vectors(n in 1usize..=8, k in 1usize..=8) {
        // lexicographic in occupied positions means descending as raw vectors
        let configs = generate_configurations(n, k);
        for pair in configs.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn symmetric_integrals_give_hermitian_spin_orbital_hamiltonian(ints in arb_symmetric_integrals(2)) {
        prop_assert!(ints.is_symmetric(1e-12));
        let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::SpinOrbital, DEFAULT_CUTOFF));
        prop_assert!(h.is_hermitian(1e-10));
        let dense = h.to_dense(4).unwrap();
        prop_assert!((&dense - dense.adjoint()).norm() < 1e-10);
    }

    #[test]
    fn symmetric_integrals_give_hermitian_spatial_hamiltonian(ints in arb_symmetric_integrals(3)) {
        let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::Spatial, DEFAULT_CUTOFF));
        prop_assert!(h.is_hermitian(1e-10));
    }
}

#[test]
fn asymmetric_one_body_term_breaks_hermiticity() {
    let mut ints = IntegralSet::h2_reference();
    ints.h1[[0, 1]] = 0.2;
    let h = jordan_wigner(&molecular_hamiltonian(&ints, SpinMode::SpinOrbital, DEFAULT_CUTOFF));
    assert!(!h.is_hermitian(1e-10));
}
