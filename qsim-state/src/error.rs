//! Error types for the mixed-state layer

use qsim_core::QuantumError;
use std::fmt;
use thiserror::Error;

/// The first density-matrix condition a candidate operator violates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixedStateViolation {
    NotSquare { rows: usize, cols: usize },
    /// Largest entrywise |ρ − ρ†| beyond tolerance
    NotHermitian { deviation: f64 },
    TraceNotOne { trace: f64 },
    NotPositive { min_eigenvalue: f64 },
}

impl fmt::Display for MixedStateViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixedStateViolation::NotSquare { rows, cols } => {
                write!(f, "matrix is not square ({}x{})", rows, cols)
            },
            MixedStateViolation::NotHermitian { deviation } => {
                write!(f, "matrix is not Hermitian (deviation {:.3e})", deviation)
            },
            MixedStateViolation::TraceNotOne { trace } => {
                write!(f, "trace is {:.10}, expected 1", trace)
            },
            MixedStateViolation::NotPositive { min_eigenvalue } => {
                write!(f, "matrix has negative eigenvalue {:.3e}", min_eigenvalue)
            },
        }
    }
}

/// Errors raised by density matrices, channels and teleportation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Operator is not a valid density matrix
    #[error("Invalid mixed state: {0}")]
    InvalidMixedState(MixedStateViolation),

    /// Channel or protocol parameter outside its domain
    #[error("Invalid parameter {name} = {value}, expected a value in [0, 1]")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Teleportation payload is not a normalized single-qubit ket
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Error from the underlying linear algebra
    #[error(transparent)]
    Quantum(#[from] QuantumError),
}

/// Result type for mixed-state operations
pub type Result<T> = std::result::Result<T, StateError>;
