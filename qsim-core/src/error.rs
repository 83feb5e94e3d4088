//! Error types for qsim

use thiserror::Error;

/// Errors raised by the linear-algebra primitives, the circuit model and the
/// gate library
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// Qubit index outside `[0, num_qubits)`
    #[error("Invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Two qubit arguments of a multi-qubit gate coincide
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(usize),

    /// Subsystem index outside the subsystem list, or requested twice
    #[error("Invalid subsystem index {index} for {count} subsystems")]
    InvalidSubsystem { index: usize, count: usize },

    /// Operands of an algebraic operation have incompatible shapes
    #[error("Dimension mismatch in {op}: expected {expected}, got {actual}")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A square matrix was required
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A Hermitian operator was required
    #[error("{0} requires a Hermitian operator")]
    NotHermitian(&'static str),

    /// The operation is not defined for the given operands
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A custom gate matrix has the wrong shape
    #[error("Invalid gate matrix: {0}")]
    InvalidMatrix(String),

    /// A gate descriptor is missing a field the gate requires
    #[error("Missing parameter for gate {gate}: '{field}'")]
    MissingField { gate: String, field: &'static str },

    /// Generic circuit validation error
    #[error("Circuit validation failed: {0}")]
    ValidationError(String),
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(op: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            op,
            expected,
            actual,
        }
    }

    /// Create a missing descriptor field error
    pub fn missing_field(gate: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            gate: gate.into(),
            field,
        }
    }
}
