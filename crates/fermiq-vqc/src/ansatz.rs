//! The three regression circuits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::VariationalCircuit;
use crate::error::{VqcError, VqcResult};

/// Named circuit layouts, all measured as ⟨Z_0⟩.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ansatz {
    /// RX(xπ) · RY(w0) on one qubit.
    #[default]
    Linear,
    /// RX(xπ) · RY(w0) RZ(w1) RY(w2) RZ(w3) on one qubit.
    Layered,
    /// Two qubits, both encoded, two rotation layers around a CNOT.
    Entangled,
}

impl Ansatz {
    /// All variants in declaration order.
    pub const ALL: [Ansatz; 3] = [Ansatz::Linear, Ansatz::Layered, Ansatz::Entangled];

    /// Build the circuit.
    pub fn circuit(self) -> VqcResult<VariationalCircuit> {
        match self {
            Ansatz::Linear => VariationalCircuit::new(1).encode(0)?.ry(0, 0),
            Ansatz::Layered => VariationalCircuit::new(1)
                .encode(0)?
                .ry(0, 0)?
                .rz(0, 1)?
                .ry(0, 2)?
                .rz(0, 3),
            Ansatz::Entangled => VariationalCircuit::new(2)
                .encode(0)?
                .encode(1)?
                .ry(0, 0)?
                .rz(0, 1)?
                .ry(1, 2)?
                .rz(1, 3)?
                .cnot(0, 1)?
                .ry(0, 4)?
                .rz(0, 5)?
                .ry(1, 6)?
                .rz(1, 7),
        }
    }
}

impl fmt::Display for Ansatz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ansatz::Linear => "linear",
            Ansatz::Layered => "layered",
            Ansatz::Entangled => "entangled",
        };
        f.write_str(name)
    }
}

impl FromStr for Ansatz {
    type Err = VqcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Ansatz::Linear),
            "layered" => Ok(Ansatz::Layered),
            "entangled" => Ok(Ansatz::Entangled),
            _ => Err(VqcError::UnknownAnsatz(s.to_string())),
        }
    }
}
