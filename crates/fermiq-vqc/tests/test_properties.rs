//! Property tests for the circuit simulator and gradients.

use approx::assert_relative_eq;
use fermiq_vqc::{Ansatz, VariationalCircuit};
use proptest::prelude::*;
use std::f64::consts::PI;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn linear_circuit_is_cos_cos(x in 0.0f64..1.0, w in -PI..PI) {
        let c = Ansatz::Linear.circuit().unwrap();
        let z = c.expectation(x, &[w]).unwrap();
        prop_assert!((z - (x * PI).cos() * w.cos()).abs() < 1e-12);
    }

    #[test]
    fn expectation_is_bounded(x in 0.0f64..1.0, w in prop::collection::vec(-PI..PI, 8)) {
        let c = Ansatz::Entangled.circuit().unwrap();
        let z = c.expectation(x, &w).unwrap();
        prop_assert!(z.abs() <= 1.0 + 1e-12);
        prop_assert!((c.state(x, &w).unwrap().norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parameter_shift_matches_finite_difference(
        x in 0.0f64..1.0,
        w in prop::collection::vec(-PI..PI, 8),
    ) {
        let c = Ansatz::Entangled.circuit().unwrap();
        let grad = c.gradient(x, &w).unwrap();
        let h = 1e-6;
        for k in 0..w.len() {
            let mut plus = w.clone();
            plus[k] += h;
            let mut minus = w.clone();
            minus[k] -= h;
            let fd = (c.expectation(x, &plus).unwrap() - c.expectation(x, &minus).unwrap()) / (2.0 * h);
            prop_assert!((grad[k] - fd).abs() < 1e-6);
        }
    }
}

#[test]
fn rz_after_encoding_does_not_change_z() {
    let c = VariationalCircuit::new(1).encode(0).unwrap().rz(0, 0).unwrap();
    assert_relative_eq!(c.expectation(0.3, &[1.7]).unwrap(), (0.3 * PI).cos(), epsilon = 1e-12);
    assert_relative_eq!(c.gradient(0.3, &[1.7]).unwrap()[0], 0.0, epsilon = 1e-12);
}
