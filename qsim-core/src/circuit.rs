//! Quantum circuit representation

use crate::operation::{GateMatrix, Operation};
use crate::{QuantumError, Result};
use serde::{Deserialize, Serialize};

/// A (qubit → classical bit) measurement binding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasurementBinding {
    pub qubit: usize,
    pub cbit: usize,
}

/// A quantum circuit
///
/// An append-only log of operations over a fixed number of qubits, plus the
/// ordered list of measurement bindings. Qubit indices are not checked on
/// append; they are validated when the operation is executed.
///
/// # Example
/// ```
/// use qsim_core::Circuit;
///
/// let mut circuit = Circuit::new(2);
/// circuit.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
/// assert_eq!(circuit.len(), 4);
/// assert!(circuit.has_explicit_measurements());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
    measurements: Vec<MeasurementBinding>,
}

impl Circuit {
    /// Create a new quantum circuit with the specified number of qubits
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::new(),
            measurements: Vec::new(),
        }
    }

    /// Fallible counterpart of [`Circuit::new`]
    pub fn try_new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(QuantumError::ValidationError(
                "Circuit must have at least one qubit".to_string(),
            ));
        }
        Ok(Self::new(num_qubits))
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            operations: Vec::with_capacity(capacity),
            measurements: Vec::new(),
        }
    }

    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operation records
    #[inline]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn measurements(&self) -> &[MeasurementBinding] {
        &self.measurements
    }

    /// Append an arbitrary record
    ///
    /// A `Measure` record pushed this way also records its binding.
    pub fn push(&mut self, operation: Operation) -> &mut Self {
        if let Operation::Measure { qubit, cbit } = operation {
            self.measurements.push(MeasurementBinding { qubit, cbit });
        }
        self.operations.push(operation);
        self
    }

    pub fn h(&mut self, qubit: usize) -> &mut Self {
        self.push(Operation::H { qubit })
    }

    pub fn x(&mut self, qubit: usize) -> &mut Self {
        self.push(Operation::X { qubit })
    }

    pub fn y(&mut self, qubit: usize) -> &mut Self {
        self.push(Operation::Y { qubit })
    }

    pub fn z(&mut self, qubit: usize) -> &mut Self {
        self.push(Operation::Z { qubit })
    }

    pub fn t(&mut self, qubit: usize) -> &mut Self {
        self.push(Operation::T { qubit })
    }

    pub fn s(&mut self, qubit: usize) -> &mut Self {
        self.push(Operation::S { qubit })
    }

    pub fn phase(&mut self, qubit: usize, theta: f64) -> &mut Self {
        self.push(Operation::Phase { qubit, theta })
    }

    pub fn rx(&mut self, qubit: usize, theta: f64) -> &mut Self {
        self.push(Operation::Rx { qubit, theta })
    }

    pub fn ry(&mut self, qubit: usize, theta: f64) -> &mut Self {
        self.push(Operation::Ry { qubit, theta })
    }

    pub fn rz(&mut self, qubit: usize, theta: f64) -> &mut Self {
        self.push(Operation::Rz { qubit, theta })
    }

    /// Controlled-X
    pub fn cx(&mut self, control: usize, target: usize) -> &mut Self {
        self.push(Operation::Cx { control, target })
    }

    pub fn cz(&mut self, control: usize, target: usize) -> &mut Self {
        self.push(Operation::Cz { control, target })
    }

    /// Controlled phase e^{iθ} on |11⟩
    pub fn cp(&mut self, control: usize, target: usize, theta: f64) -> &mut Self {
        self.push(Operation::Cp {
            control,
            target,
            theta,
        })
    }

    pub fn swap(&mut self, qubit1: usize, qubit2: usize) -> &mut Self {
        self.push(Operation::Swap { qubit1, qubit2 })
    }

    /// Measure `qubit` into classical bit `cbit`
    pub fn measure(&mut self, qubit: usize, cbit: usize) -> &mut Self {
        self.push(Operation::Measure { qubit, cbit })
    }

    /// Apply a user-supplied 2×2 matrix to `qubit`
    pub fn custom(&mut self, qubit: usize, matrix: GateMatrix) -> &mut Self {
        self.push(Operation::Custom { qubit, matrix })
    }

    /// True when the binding log is non-empty
    pub fn has_explicit_measurements(&self) -> bool {
        !self.measurements.is_empty()
    }

    pub fn has_measure_operations(&self) -> bool {
        self.operations.iter().any(Operation::is_measurement)
    }

    /// True when some measurement is followed by a state-changing operation
    pub fn has_mid_circuit_measurement(&self) -> bool {
        match self.operations.iter().position(Operation::is_measurement) {
            Some(first) => self.operations[first + 1..]
                .iter()
                .any(Operation::is_state_changing),
            None => false,
        }
    }

    /// Check every qubit index against the register width
    pub fn validate(&self) -> Result<()> {
        for (i, op) in self.operations.iter().enumerate() {
            if let Some(qubit) = op.qubits().into_iter().find(|&q| q >= self.num_qubits) {
                return Err(QuantumError::ValidationError(format!(
                    "Operation {} uses invalid qubit {}",
                    i, qubit
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Circuit({} qubits, {} operations)", self.num_qubits, self.len())?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {}: {}", i, op)?;
        }
        Ok(())
    }
}
