//! Circuits compiled for repeated execution
//!
//! Operators do not depend on the state, so a gate's `2^n × 2^n` operator is
//! built once per run and reused by every trajectory, as long as the cache
//! budget allows. Gates past the budget keep only their record and are rebuilt
//! each time they are applied. Measurements never hold an operator.

use crate::error::{Result, SimulatorError};
use qsim_core::{Circuit, Ket, MeasurementBinding, Operation, Operator};
use qsim_gates::{check_operands, operator_for};
use std::fmt;
use tracing::warn;

/// One compiled step of a [`Program`]
#[derive(Debug, Clone)]
pub enum Step {
    /// Left-multiply the state by the operator of `operation`
    ///
    /// `operator` is `None` when the step did not fit in the cache budget.
    Unitary {
        index: usize,
        operation: Operation,
        operator: Option<Operator>,
    },

    /// Measure `qubit` in the computational basis into `cbit`
    Measure { index: usize, qubit: usize, cbit: usize },

    /// Gate name with no implementation; execution passes over it
    Skip { index: usize, name: String },
}

impl Step {
    /// Position of the originating record in the circuit
    ///
    /// Measurements synthesized by auto-measure are numbered after the last
    /// record.
    pub fn index(&self) -> usize {
        match self {
            Step::Unitary { index, .. } | Step::Measure { index, .. } | Step::Skip { index, .. } => {
                *index
            },
        }
    }
}

/// How a compiled program is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPath {
    /// One pure run; the final state vector is the result
    StateVector,
    /// Every shot runs its own trajectory with collapse
    Trajectories,
    /// One pure run, then shots are drawn from |amplitude|²
    DeferredSampling,
}

impl fmt::Display for ExecutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionPath::StateVector => write!(f, "statevector"),
            ExecutionPath::Trajectories => write!(f, "trajectories"),
            ExecutionPath::DeferredSampling => write!(f, "deferred sampling"),
        }
    }
}

/// A circuit compiled for repeated execution
#[derive(Debug, Clone)]
pub struct Program {
    num_qubits: usize,
    steps: Vec<Step>,
    bindings: Vec<MeasurementBinding>,
    mid_circuit_measurement: bool,
}

impl Program {
    /// Compile `circuit`, optionally synthesizing terminal measurements
    ///
    /// When `auto_measure` is set and the circuit declares no measurement
    /// bindings, every qubit `i` is measured into classical bit `i` after the
    /// last record. The circuit itself is left untouched.
    ///
    /// Gate operators are cached in circuit order while their total size stays
    /// within `cache_budget` bytes.
    ///
    /// # Errors
    /// `OperationFailed { index, .. }` for the first record with a bad qubit
    /// index or duplicate qubits.
    pub fn compile(circuit: &Circuit, auto_measure: bool, cache_budget: usize) -> Result<Self> {
        let n = circuit.num_qubits();
        let dim = 1usize << n;
        let operator_bytes = dim * dim * std::mem::size_of::<num_complex::Complex64>();
        let mut remaining = cache_budget;
        let mut steps = Vec::with_capacity(circuit.len());

        for (index, operation) in circuit.operations().iter().enumerate() {
            check_operands(operation, n)
                .map_err(|source| SimulatorError::OperationFailed { index, source })?;

            let step = match operation {
                Operation::Measure { qubit, cbit } => Step::Measure {
                    index,
                    qubit: *qubit,
                    cbit: *cbit,
                },
                Operation::Unsupported { name } => {
                    warn!(index, gate = %name, "unsupported gate ignored");
                    Step::Skip {
                        index,
                        name: name.clone(),
                    }
                },
                _ => {
                    let operator = if operator_bytes <= remaining {
                        remaining -= operator_bytes;
                        operator_for(operation, n)
                            .map_err(|source| SimulatorError::OperationFailed { index, source })?
                    } else {
                        None
                    };
                    Step::Unitary {
                        index,
                        operation: operation.clone(),
                        operator,
                    }
                },
            };
            steps.push(step);
        }

        let mut bindings = circuit.measurements().to_vec();
        if bindings.is_empty() && auto_measure {
            for qubit in 0..n {
                bindings.push(MeasurementBinding { qubit, cbit: qubit });
                steps.push(Step::Measure {
                    index: circuit.len() + qubit,
                    qubit,
                    cbit: qubit,
                });
            }
        }

        Ok(Self {
            num_qubits: n,
            steps,
            bindings,
            mid_circuit_measurement: circuit.has_mid_circuit_measurement(),
        })
    }

    /// Apply a unitary step to `state`, building its operator if it was not cached
    ///
    /// Measurement and skipped steps return the state unchanged.
    pub fn apply(&self, step: &Step, state: Ket) -> Result<Ket> {
        match step {
            Step::Unitary {
                index,
                operation,
                operator,
            } => {
                let failed = |source| SimulatorError::OperationFailed {
                    index: *index,
                    source,
                };
                match operator {
                    Some(operator) => operator.apply(&state).map_err(failed),
                    None => match operator_for(operation, self.num_qubits).map_err(failed)? {
                        Some(built) => built.apply(&state).map_err(failed),
                        None => Ok(state),
                    },
                }
            },
            Step::Measure { .. } | Step::Skip { .. } => Ok(state),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Declared bindings, or the synthesized `i → i` ones
    pub fn bindings(&self) -> &[MeasurementBinding] {
        &self.bindings
    }

    pub fn has_measurements(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::Measure { .. }))
    }

    /// A measurement is followed by a state-changing record
    pub fn has_mid_circuit_measurement(&self) -> bool {
        self.mid_circuit_measurement
    }

    /// Number of unitary steps
    pub fn gate_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Unitary { .. }))
            .count()
    }

    /// Number of dense operators cached by the program
    pub fn cached_operator_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Unitary { operator: Some(_), .. }))
            .count()
    }

    /// Number of steps skipped as unsupported
    pub fn skipped_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, Step::Skip { .. }))
            .count()
    }

    /// Pick the execution path for this program
    pub fn execution_path(&self, deferred_sampling: bool) -> ExecutionPath {
        if !self.has_measurements() && self.bindings.is_empty() {
            ExecutionPath::StateVector
        } else if self.mid_circuit_measurement || !deferred_sampling {
            ExecutionPath::Trajectories
        } else {
            ExecutionPath::DeferredSampling
        }
    }
}
