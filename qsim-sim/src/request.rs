//! JSON request and response bodies
//!
//! ```json
//! {"num_qubits": 2, "shots": 100, "operations": [{"type": "h", "qubit": 0}]}
//! ```
//!
//! answers with either `{"counts": {...}, "shots": 100, "num_qubits": 2}` or,
//! for unmeasured circuits with auto-measure off,
//! `{"statevector": [[re, im], ...], "shots": 100, "num_qubits": 2}`.

use crate::result::{SimulationOutcome, SimulationResult};
use qsim_core::{Circuit, GateDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_shots() -> usize {
    1024
}

/// A circuit to simulate, as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub num_qubits: usize,

    #[serde(default = "default_shots")]
    pub shots: usize,

    #[serde(default)]
    pub operations: Vec<GateDescriptor>,
}

impl SimulationRequest {
    pub fn new(num_qubits: usize, operations: Vec<GateDescriptor>) -> Self {
        Self {
            num_qubits,
            shots: default_shots(),
            operations,
        }
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Build the circuit, rejecting malformed descriptors
    pub fn to_circuit(&self) -> qsim_core::Result<Circuit> {
        Circuit::from_descriptors(self.num_qubits, &self.operations)
    }
}

/// Body returned for a [`SimulationRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimulationResponse {
    StateVector {
        /// Amplitudes as `[re, im]` pairs, basis index order
        statevector: Vec<[f64; 2]>,
        shots: usize,
        num_qubits: usize,
    },
    Counts {
        counts: HashMap<String, usize>,
        shots: usize,
        num_qubits: usize,
    },
}

impl From<SimulationResult> for SimulationResponse {
    fn from(result: SimulationResult) -> Self {
        match result.outcome {
            SimulationOutcome::StateVector(state) => SimulationResponse::StateVector {
                statevector: state.amplitudes().iter().map(|c| [c.re, c.im]).collect(),
                shots: result.shots,
                num_qubits: result.num_qubits,
            },
            SimulationOutcome::Counts(counts) => SimulationResponse::Counts {
                counts: counts.into_counts(),
                shots: result.shots,
                num_qubits: result.num_qubits,
            },
        }
    }
}
