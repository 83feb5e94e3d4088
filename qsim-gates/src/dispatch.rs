//! Operation record → operator dispatch

use crate::standard;
use qsim_core::{Operation, Operator, Result};

/// Full-system operator for a circuit record
///
/// Returns `Ok(None)` for records that have no unitary: measurements (handled
/// by the simulator) and unsupported gate names.
///
/// # Errors
/// Propagates `InvalidQubit` / `DuplicateQubit` from the constructors.
pub fn operator_for(operation: &Operation, num_qubits: usize) -> Result<Option<Operator>> {
    let n = num_qubits;
    let op = match *operation {
        Operation::H { qubit } => standard::hadamard(qubit, n)?,
        Operation::X { qubit } => standard::pauli_x(qubit, n)?,
        Operation::Y { qubit } => standard::pauli_y(qubit, n)?,
        Operation::Z { qubit } => standard::pauli_z(qubit, n)?,
        Operation::T { qubit } => standard::t_gate(qubit, n)?,
        Operation::S { qubit } => standard::s_gate(qubit, n)?,
        Operation::Phase { qubit, theta } => standard::phase(qubit, theta, n)?,
        Operation::Rx { qubit, theta } => standard::rx(qubit, theta, n)?,
        Operation::Ry { qubit, theta } => standard::ry(qubit, theta, n)?,
        Operation::Rz { qubit, theta } => standard::rz(qubit, theta, n)?,
        Operation::Cx { control, target } => standard::cnot(control, target, n)?,
        Operation::Cz { control, target } => standard::cz(control, target, n)?,
        Operation::Cp {
            control,
            target,
            theta,
        } => standard::cp(control, target, theta, n)?,
        Operation::Swap { qubit1, qubit2 } => standard::swap(qubit1, qubit2, n)?,
        Operation::Custom { qubit, ref matrix } => {
            standard::single_qubit(matrix.as_array(), qubit, n)?
        },
        Operation::Measure { .. } | Operation::Unsupported { .. } => return Ok(None),
    };
    Ok(Some(op))
}

/// Check a record's qubit operands without building its operator
///
/// Reports the same error [`operator_for`] would, in the same order. Measurements
/// are checked too; unsupported records always pass.
pub fn check_operands(operation: &Operation, num_qubits: usize) -> Result<()> {
    match *operation {
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
        | Operation::Custom { qubit, .. }
        | Operation::Measure { qubit, .. } => standard::check_qubit(qubit, num_qubits),
        Operation::Cx { control, target }
        | Operation::Cz { control, target }
        | Operation::Cp {
            control, target, ..
        } => standard::check_pair(control, target, num_qubits),
        Operation::Swap { qubit1, qubit2 } => standard::check_pair(qubit1, qubit2, num_qubits),
        Operation::Unsupported { .. } => Ok(()),
    }
}
