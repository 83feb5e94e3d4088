//! Full-system gate operators
//!
//! Every constructor returns the dense 2^n × 2^n operator for a gate acting on
//! specific qubits of an n-qubit register. Qubit 0 is the least-significant
//! bit of the basis index, so a single-qubit gate on qubit `q` is
//! `I_{2^(n-1-q)} ⊗ G ⊗ I_{2^q}`.
//!
//! # Example
//! ```
//! use qsim_core::Ket;
//! use qsim_gates::standard;
//!
//! // X on qubit 0 of a 2-qubit register maps |00⟩ to |01⟩ (index 1)
//! let x0 = standard::pauli_x(0, 2).unwrap();
//! let out = x0.apply(&Ket::zero_state(2)).unwrap();
//! assert_eq!(out.get(1).re, 1.0);
//! ```

use crate::matrices;
use nalgebra::DMatrix;
use num_complex::Complex64;
use qsim_core::{Operator, QuantumError, Result};

#[inline]
pub(crate) fn check_qubit(qubit: usize, num_qubits: usize) -> Result<()> {
    if qubit >= num_qubits {
        return Err(QuantumError::invalid_qubit(qubit, num_qubits));
    }
    Ok(())
}

pub(crate) fn check_pair(a: usize, b: usize, num_qubits: usize) -> Result<()> {
    check_qubit(a, num_qubits)?;
    check_qubit(b, num_qubits)?;
    if a == b {
        return Err(QuantumError::DuplicateQubit(a));
    }
    Ok(())
}

/// Embed a 2×2 matrix on `qubit`
///
/// # Errors
/// Returns `InvalidQubit` if `qubit >= num_qubits`.
pub fn single_qubit(matrix: &[[Complex64; 2]; 2], qubit: usize, num_qubits: usize) -> Result<Operator> {
    check_qubit(qubit, num_qubits)?;
    let above = Operator::identity(1 << (num_qubits - 1 - qubit));
    let below = Operator::identity(1 << qubit);
    Ok(above.tensor(&[&Operator::from_array2(matrix), &below]))
}

pub fn hadamard(qubit: usize, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::HADAMARD, qubit, num_qubits)
}

pub fn pauli_x(qubit: usize, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::PAULI_X, qubit, num_qubits)
}

pub fn pauli_y(qubit: usize, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::PAULI_Y, qubit, num_qubits)
}

pub fn pauli_z(qubit: usize, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::PAULI_Z, qubit, num_qubits)
}

/// diag(1, e^{iθ}) on `qubit`
pub fn phase(qubit: usize, theta: f64, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::phase(theta), qubit, num_qubits)
}

/// T = P(π/4)
pub fn t_gate(qubit: usize, num_qubits: usize) -> Result<Operator> {
    phase(qubit, std::f64::consts::FRAC_PI_4, num_qubits)
}

/// S = P(π/2)
pub fn s_gate(qubit: usize, num_qubits: usize) -> Result<Operator> {
    phase(qubit, std::f64::consts::FRAC_PI_2, num_qubits)
}

pub fn rx(qubit: usize, theta: f64, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::rotation_x(theta), qubit, num_qubits)
}

pub fn ry(qubit: usize, theta: f64, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::rotation_y(theta), qubit, num_qubits)
}

pub fn rz(qubit: usize, theta: f64, num_qubits: usize) -> Result<Operator> {
    single_qubit(&matrices::rotation_z(theta), qubit, num_qubits)
}

/// Controlled-NOT as a permutation matrix
///
/// Basis state `i` maps to `i ^ (1 << target)` when bit `control` of `i` is set.
///
/// # Errors
/// `InvalidQubit` for an out-of-range index, `DuplicateQubit` when
/// `control == target`.
pub fn cnot(control: usize, target: usize, num_qubits: usize) -> Result<Operator> {
    check_pair(control, target, num_qubits)?;
    let dim = 1usize << num_qubits;
    let mut m = DMatrix::<Complex64>::zeros(dim, dim);
    for i in 0..dim {
        let j = if (i >> control) & 1 == 1 {
            i ^ (1 << target)
        } else {
            i
        };
        m[(j, i)] = Complex64::new(1.0, 0.0);
    }
    Ok(Operator::new(m))
}

/// Controlled phase: e^{iθ} on every basis state with both bits set
pub fn cp(control: usize, target: usize, theta: f64, num_qubits: usize) -> Result<Operator> {
    check_pair(control, target, num_qubits)?;
    let dim = 1usize << num_qubits;
    let mask = (1 << control) | (1 << target);
    let mut m = DMatrix::<Complex64>::identity(dim, dim);
    for i in (0..dim).filter(|i| i & mask == mask) {
        m[(i, i)] = Complex64::from_polar(1.0, theta);
    }
    Ok(Operator::new(m))
}

/// SWAP = CNOT(a,b) · CNOT(b,a) · CNOT(a,b)
pub fn swap(qubit1: usize, qubit2: usize, num_qubits: usize) -> Result<Operator> {
    let ab = cnot(qubit1, qubit2, num_qubits)?;
    let ba = cnot(qubit2, qubit1, num_qubits)?;
    ab.matmul(&ba)?.matmul(&ab)
}

/// CZ = H_target · CNOT(control, target) · H_target
pub fn cz(control: usize, target: usize, num_qubits: usize) -> Result<Operator> {
    let cx = cnot(control, target, num_qubits)?;
    let h = hadamard(target, num_qubits)?;
    h.matmul(&cx)?.matmul(&h)
}

/// |outcome⟩⟨outcome| on `qubit`
///
/// # Errors
/// `InvalidQubit` for an out-of-range qubit, `UnsupportedOperation` for an
/// outcome other than 0 or 1.
pub fn projector(qubit: usize, outcome: usize, num_qubits: usize) -> Result<Operator> {
    let matrix = match outcome {
        0 => &matrices::PROJECTOR_ZERO,
        1 => &matrices::PROJECTOR_ONE,
        other => {
            return Err(QuantumError::UnsupportedOperation(format!(
                "measurement outcome {} is not a bit",
                other
            )))
        },
    };
    single_qubit(matrix, qubit, num_qubits)
}
