//! Parameterized circuits with an input-encoding angle and trainable weights.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::{VqcError, VqcResult};
use crate::statevector::Statevector;

/// Where a rotation angle comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// `x · π` for the current input x.
    Input,
    /// `weights[k]`.
    Weight(usize),
}

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// RX
    X,
    /// RY
    Y,
    /// RZ
    Z,
}

/// One gate of a [`VariationalCircuit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Single-qubit rotation.
    Rotation {
        /// Rotation axis.
        axis: Axis,
        /// Target qubit.
        qubit: usize,
        /// Angle source.
        angle: Angle,
    },
    /// Controlled NOT.
    Cnot {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
}

/// A fixed gate sequence measured as ⟨Z_0⟩.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationalCircuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl VariationalCircuit {
    /// Empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    fn check(&self, qubit: usize) -> VqcResult<()> {
        if qubit >= self.num_qubits {
            return Err(VqcError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn rotation(mut self, axis: Axis, qubit: usize, angle: Angle) -> VqcResult<Self> {
        self.check(qubit)?;
        self.gates.push(Gate::Rotation { axis, qubit, angle });
        Ok(self)
    }

    /// Encode the input as RX(x·π).
    pub fn encode(self, qubit: usize) -> VqcResult<Self> {
        self.rotation(Axis::X, qubit, Angle::Input)
    }

    /// RX(weights[w]).
    pub fn rx(self, qubit: usize, w: usize) -> VqcResult<Self> {
        self.rotation(Axis::X, qubit, Angle::Weight(w))
    }

    /// RY(weights[w]).
    pub fn ry(self, qubit: usize, w: usize) -> VqcResult<Self> {
        self.rotation(Axis::Y, qubit, Angle::Weight(w))
    }

    /// RZ(weights[w]).
    pub fn rz(self, qubit: usize, w: usize) -> VqcResult<Self> {
        self.rotation(Axis::Z, qubit, Angle::Weight(w))
    }

    /// CNOT(control → target).
    pub fn cnot(mut self, control: usize, target: usize) -> VqcResult<Self> {
        self.check(control)?;
        self.check(target)?;
        self.gates.push(Gate::Cnot { control, target });
        Ok(self)
    }

    /// Circuit width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// One past the highest weight index referenced.
    pub fn num_weights(&self) -> usize {
        self.gates
            .iter()
            .filter_map(|g| match g {
                Gate::Rotation {
                    angle: Angle::Weight(k),
                    ..
                } => Some(k + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn check_weights(&self, weights: &[f64]) -> VqcResult<()> {
        let expected = self.num_weights();
        if weights.len() != expected {
            return Err(VqcError::WeightCount {
                expected,
                found: weights.len(),
            });
        }
        Ok(())
    }

    /// Final state for input `x`; gate `shift.0` gets `shift.1` added to its angle.
    fn simulate(&self, x: f64, weights: &[f64], shift: Option<(usize, f64)>) -> Statevector {
        let mut sv = Statevector::new(self.num_qubits);
        for (idx, gate) in self.gates.iter().enumerate() {
            match *gate {
                Gate::Rotation { axis, qubit, angle } => {
                    let mut theta = match angle {
                        Angle::Input => x * PI,
                        Angle::Weight(k) => weights[k],
                    };
                    if let Some((at, delta)) = shift {
                        if at == idx {
                            theta += delta;
                        }
                    }
                    match axis {
                        Axis::X => sv.apply_rx(qubit, theta),
                        Axis::Y => sv.apply_ry(qubit, theta),
                        Axis::Z => sv.apply_rz(qubit, theta),
                    }
                }
                Gate::Cnot { control, target } => sv.apply_cnot(control, target),
            }
        }
        sv
    }

    /// Final statevector for input `x`.
    pub fn state(&self, x: f64, weights: &[f64]) -> VqcResult<Statevector> {
        self.check_weights(weights)?;
        Ok(self.simulate(x, weights, None))
    }

    /// ⟨Z_0⟩ for input `x`.
    pub fn expectation(&self, x: f64, weights: &[f64]) -> VqcResult<f64> {
        Ok(self.state(x, weights)?.expectation_z(0))
    }

    /// ∂⟨Z_0⟩/∂weights by the parameter-shift rule.
    ///
    /// A weight used by several gates gets one shifted pair per occurrence.
    pub fn gradient(&self, x: f64, weights: &[f64]) -> VqcResult<Vec<f64>> {
        self.check_weights(weights)?;
        let mut grad = vec![0.0; weights.len()];
        for (idx, gate) in self.gates.iter().enumerate() {
            if let Gate::Rotation {
                angle: Angle::Weight(k),
                ..
            } = *gate
            {
                let plus = self.simulate(x, weights, Some((idx, FRAC_PI_2))).expectation_z(0);
                let minus = self.simulate(x, weights, Some((idx, -FRAC_PI_2))).expectation_z(0);
                grad[k] += 0.5 * (plus - minus);
            }
        }
        Ok(grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear() -> VariationalCircuit {
        VariationalCircuit::new(1).encode(0).unwrap().ry(0, 0).unwrap()
    }

    #[test]
    fn test_linear_closed_form() {
        let c = linear();
        for &(x, w) in &[(0.0, 0.1), (0.3, -0.7), (1.0, 2.0)] {
            let expected = (x * PI).cos() * f64::cos(w);
            assert_relative_eq!(c.expectation(x, &[w]).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parameter_shift_closed_form() {
        let c = linear();
        let (x, w) = (0.25, 0.4);
        let g = c.gradient(x, &[w]).unwrap();
        assert_relative_eq!(g[0], -(x * PI).cos() * f64::sin(w), epsilon = 1e-12);
    }

    #[test]
    fn test_shared_weight_sums_occurrences() {
        // RY(w) RY(w) = RY(2w): d/dw cos(2w) = -2 sin(2w)
        let c = VariationalCircuit::new(1).ry(0, 0).unwrap().ry(0, 0).unwrap();
        let w = 0.3f64;
        let g = c.gradient(0.0, &[w]).unwrap();
        assert_relative_eq!(g[0], -2.0 * (2.0 * w).sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let err = VariationalCircuit::new(1).cnot(0, 1).unwrap_err();
        assert!(matches!(err, VqcError::QubitOutOfRange { qubit: 1, num_qubits: 1 }));
    }

    #[test]
    fn test_weight_count_checked() {
        let c = linear();
        assert_eq!(c.num_weights(), 1);
        assert!(matches!(
            c.expectation(0.5, &[0.1, 0.2]),
            Err(VqcError::WeightCount { expected: 1, found: 2 })
        ));
    }
}
