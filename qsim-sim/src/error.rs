//! Error types for the simulator

use qsim_core::QuantumError;
use std::fmt;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Invalid configuration
    InvalidConfig(String),

    /// Circuit is invalid or malformed
    InvalidCircuit(String),

    /// Register wider than the configured ceiling
    TooManyQubits {
        num_qubits: usize,
        max_qubits: usize,
    },

    /// Operation `index` of the circuit failed
    OperationFailed {
        index: usize,
        source: QuantumError,
    },

    /// Measurement failed
    MeasurementFailed(String),

    /// The run was cancelled through its token
    Cancelled,
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            },
            SimulatorError::InvalidCircuit(msg) => {
                write!(f, "Invalid circuit: {}", msg)
            },
            SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits,
            } => {
                write!(
                    f,
                    "Too many qubits: circuit has {}, max supported is {}",
                    num_qubits, max_qubits
                )
            },
            SimulatorError::OperationFailed { index, source } => {
                write!(f, "Operation {} failed: {}", index, source)
            },
            SimulatorError::MeasurementFailed(msg) => {
                write!(f, "Measurement failed: {}", msg)
            },
            SimulatorError::Cancelled => write!(f, "Simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::OperationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<QuantumError> for SimulatorError {
    fn from(err: QuantumError) -> Self {
        SimulatorError::InvalidCircuit(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_operation_failed_display_and_source() {
        let err = SimulatorError::OperationFailed {
            index: 3,
            source: QuantumError::InvalidQubit(4, 2),
        };
        assert_eq!(
            err.to_string(),
            "Operation 3 failed: Invalid qubit index 4: circuit has only 2 qubits"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_quantum_error() {
        let err: SimulatorError = QuantumError::missing_field("cx", "target").into();
        assert!(matches!(err, SimulatorError::InvalidCircuit(_)));
    }
}
