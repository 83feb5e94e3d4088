//! Operation records stored in a circuit

use crate::{QuantumError, Result};
use num_complex::Complex64;
use std::fmt;

/// A validated 2×2 complex matrix for a user-supplied single-qubit gate
///
/// Unitarity is not checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateMatrix([[Complex64; 2]; 2]);

impl GateMatrix {
    /// Build from row-major entries
    ///
    /// # Errors
    /// Returns `InvalidMatrix` unless there are exactly two rows of two entries.
    pub fn new(rows: &[Vec<Complex64>]) -> Result<Self> {
        if rows.len() != 2 {
            return Err(QuantumError::InvalidMatrix(format!(
                "expected 2 rows, got {}",
                rows.len()
            )));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != 2) {
            return Err(QuantumError::InvalidMatrix(format!(
                "expected 2 columns, got {}",
                row.len()
            )));
        }
        Ok(Self([[rows[0][0], rows[0][1]], [rows[1][0], rows[1][1]]]))
    }

    pub const fn from_array(matrix: [[Complex64; 2]; 2]) -> Self {
        Self(matrix)
    }

    #[inline]
    pub fn as_array(&self) -> &[[Complex64; 2]; 2] {
        &self.0
    }
}

/// One record in a circuit's operation log
///
/// Gates are a closed set matched exhaustively by the gate library.
/// `Unsupported` keeps an unrecognized gate name so the run can skip it.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    H { qubit: usize },
    X { qubit: usize },
    Y { qubit: usize },
    Z { qubit: usize },
    T { qubit: usize },
    S { qubit: usize },
    Phase { qubit: usize, theta: f64 },
    Rx { qubit: usize, theta: f64 },
    Ry { qubit: usize, theta: f64 },
    Rz { qubit: usize, theta: f64 },
    Cx { control: usize, target: usize },
    Cz { control: usize, target: usize },
    Cp { control: usize, target: usize, theta: f64 },
    Swap { qubit1: usize, qubit2: usize },
    /// Projective Z-basis measurement writing into classical bit `cbit`
    Measure { qubit: usize, cbit: usize },
    Custom { qubit: usize, matrix: GateMatrix },
    Unsupported { name: String },
}

impl Operation {
    /// Lower-case gate tag
    pub fn name(&self) -> &str {
        match self {
            Operation::H { .. } => "h",
            Operation::X { .. } => "x",
            Operation::Y { .. } => "y",
            Operation::Z { .. } => "z",
            Operation::T { .. } => "t",
            Operation::S { .. } => "s",
            Operation::Phase { .. } => "phase",
            Operation::Rx { .. } => "rx",
            Operation::Ry { .. } => "ry",
            Operation::Rz { .. } => "rz",
            Operation::Cx { .. } => "cx",
            Operation::Cz { .. } => "cz",
            Operation::Cp { .. } => "cp",
            Operation::Swap { .. } => "swap",
            Operation::Measure { .. } => "measure",
            Operation::Custom { .. } => "custom",
            Operation::Unsupported { name } => name,
        }
    }

    /// Qubits the record touches, in argument order
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Operation::H { qubit }
            | Operation::X { qubit }
            | Operation::Y { qubit }
            | Operation::Z { qubit }
            | Operation::T { qubit }
            | Operation::S { qubit }
            | Operation::Phase { qubit, .. }
            | Operation::Rx { qubit, .. }
            | Operation::Ry { qubit, .. }
            | Operation::Rz { qubit, .. }
            | Operation::Measure { qubit, .. }
            | Operation::Custom { qubit, .. } => vec![qubit],
            Operation::Cx { control, target }
            | Operation::Cz { control, target }
            | Operation::Cp { control, target, .. } => vec![control, target],
            Operation::Swap { qubit1, qubit2 } => vec![qubit1, qubit2],
            Operation::Unsupported { .. } => Vec::new(),
        }
    }

    #[inline]
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Operation::Unsupported { .. })
    }

    /// True for records that change the quantum state when executed
    pub fn is_state_changing(&self) -> bool {
        !self.is_measurement() && !self.is_unsupported()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Phase { qubit, theta }
            | Operation::Rx { qubit, theta }
            | Operation::Ry { qubit, theta }
            | Operation::Rz { qubit, theta } => write!(f, "{}({:.4}) q{}", self.name(), theta, qubit),
            Operation::Cp {
                control,
                target,
                theta,
            } => write!(f, "cp({:.4}) q{}, q{}", theta, control, target),
            Operation::Measure { qubit, cbit } => write!(f, "measure q{} -> c{}", qubit, cbit),
            Operation::Unsupported { name } => write!(f, "{} (unsupported)", name),
            _ => {
                let qubits: Vec<String> = self.qubits().iter().map(|q| format!("q{}", q)).collect();
                write!(f, "{} {}", self.name(), qubits.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_matrix_shape() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let ok = GateMatrix::new(&[vec![one, zero], vec![zero, one]]);
        assert!(ok.is_ok());

        let short = GateMatrix::new(&[vec![one, zero]]);
        assert!(matches!(short, Err(QuantumError::InvalidMatrix(_))));

        let ragged = GateMatrix::new(&[vec![one, zero], vec![zero]]);
        assert!(matches!(ragged, Err(QuantumError::InvalidMatrix(_))));
    }

    #[test]
    fn test_qubits_order() {
        let op = Operation::Cx {
            control: 2,
            target: 0,
        };
        assert_eq!(op.qubits(), vec![2, 0]);
        assert_eq!(op.name(), "cx");
        assert!(op.is_state_changing());
    }

    #[test]
    fn test_measurement_and_unsupported_flags() {
        let measure = Operation::Measure { qubit: 0, cbit: 1 };
        assert!(measure.is_measurement());
        assert!(!measure.is_state_changing());

        let unknown = Operation::Unsupported {
            name: "toffoli".to_string(),
        };
        assert!(unknown.is_unsupported());
        assert!(!unknown.is_state_changing());
        assert_eq!(unknown.name(), "toffoli");
        assert!(unknown.qubits().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Operation::H { qubit: 1 }), "h q1");
        assert_eq!(
            format!("{}", Operation::Measure { qubit: 0, cbit: 2 }),
            "measure q0 -> c2"
        );
        assert_eq!(
            format!("{}", Operation::Rx { qubit: 0, theta: 0.5 }),
            "rx(0.5000) q0"
        );
    }
}
