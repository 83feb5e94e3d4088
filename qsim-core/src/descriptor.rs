//! Serde descriptors for gate operations supplied by callers
//!
//! A descriptor is a flat JSON object:
//!
//! ```json
//! {"type": "cx", "control": 0, "target": 1}
//! {"type": "rx", "qubit": 0, "theta": 1.5707963}
//! {"type": "custom", "qubit": 0, "matrix": [[0, 1], [[0, 1], 0]]}
//! ```
//!
//! `type` is matched case-insensitively. Matrix entries are either a real
//! number or an `[re, im]` pair.

use crate::circuit::Circuit;
use crate::operation::{GateMatrix, Operation};
use crate::{QuantumError, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// One matrix entry: a real number or an `[re, im]` pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixEntry {
    Real(f64),
    Complex([f64; 2]),
}

impl From<MatrixEntry> for Complex64 {
    fn from(entry: MatrixEntry) -> Self {
        match entry {
            MatrixEntry::Real(re) => Complex64::new(re, 0.0),
            MatrixEntry::Complex([re, im]) => Complex64::new(re, im),
        }
    }
}

/// Caller-facing description of one circuit operation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GateDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit1: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit2: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cbit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<MatrixEntry>>>,
}

impl GateDescriptor {
    /// Descriptor with only the `type` field set
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Convert to an operation record
    ///
    /// # Errors
    /// - `MissingField` when `type` or a field the gate requires is absent
    /// - `InvalidMatrix` when a custom matrix is not 2×2
    ///
    /// An unrecognized `type` is not an error; it becomes
    /// [`Operation::Unsupported`].
    pub fn to_operation(&self) -> Result<Operation> {
        let kind = self
            .kind
            .as_deref()
            .ok_or_else(|| QuantumError::missing_field("<untyped>", "type"))?;
        let tag = kind.to_ascii_lowercase();
        let theta = self.theta.unwrap_or(0.0);

        let op = match tag.as_str() {
            "h" => Operation::H { qubit: self.require(&tag, "qubit", self.qubit)? },
            "x" => Operation::X { qubit: self.require(&tag, "qubit", self.qubit)? },
            "y" => Operation::Y { qubit: self.require(&tag, "qubit", self.qubit)? },
            "z" => Operation::Z { qubit: self.require(&tag, "qubit", self.qubit)? },
            "t" => Operation::T { qubit: self.require(&tag, "qubit", self.qubit)? },
            "s" => Operation::S { qubit: self.require(&tag, "qubit", self.qubit)? },
            "phase" => Operation::Phase {
                qubit: self.require(&tag, "qubit", self.qubit)?,
                theta,
            },
            "rx" => Operation::Rx {
                qubit: self.require(&tag, "qubit", self.qubit)?,
                theta,
            },
            "ry" => Operation::Ry {
                qubit: self.require(&tag, "qubit", self.qubit)?,
                theta,
            },
            "rz" => Operation::Rz {
                qubit: self.require(&tag, "qubit", self.qubit)?,
                theta,
            },
            "cx" => Operation::Cx {
                control: self.require(&tag, "control", self.control)?,
                target: self.require(&tag, "target", self.target)?,
            },
            "cz" => Operation::Cz {
                control: self.require(&tag, "control", self.control)?,
                target: self.require(&tag, "target", self.target)?,
            },
            "cp" => Operation::Cp {
                control: self.require(&tag, "control", self.control)?,
                target: self.require(&tag, "target", self.target)?,
                theta,
            },
            "swap" => Operation::Swap {
                qubit1: self.require(&tag, "qubit1", self.qubit1)?,
                qubit2: self.require(&tag, "qubit2", self.qubit2)?,
            },
            "measure" => {
                let qubit = self.require(&tag, "qubit", self.qubit)?;
                Operation::Measure {
                    qubit,
                    cbit: self.cbit.unwrap_or(qubit),
                }
            },
            "custom" => {
                let rows = self
                    .matrix
                    .as_ref()
                    .ok_or_else(|| QuantumError::missing_field(tag.as_str(), "matrix"))?;
                let rows: Vec<Vec<Complex64>> = rows
                    .iter()
                    .map(|row| row.iter().map(|&e| Complex64::from(e)).collect())
                    .collect();
                Operation::Custom {
                    qubit: self.require(&tag, "qubit", self.qubit)?,
                    matrix: GateMatrix::new(&rows)?,
                }
            },
            _ => Operation::Unsupported { name: tag },
        };
        Ok(op)
    }

    fn require(&self, gate: &str, field: &'static str, value: Option<usize>) -> Result<usize> {
        value.ok_or_else(|| QuantumError::missing_field(gate, field))
    }
}

impl Circuit {
    /// Build a circuit from a list of descriptors
    ///
    /// Stops at the first invalid descriptor.
    pub fn from_descriptors(num_qubits: usize, descriptors: &[GateDescriptor]) -> Result<Circuit> {
        let mut circuit = Circuit::try_new(num_qubits)?;
        for descriptor in descriptors {
            circuit.push(descriptor.to_operation()?);
        }
        Ok(circuit)
    }
}
