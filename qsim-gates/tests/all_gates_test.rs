//! Comprehensive tests for the full-system gate library

use approx::assert_relative_eq;
use num_complex::Complex64;
use qsim_core::{Ket, Operation, Operator};
use qsim_gates::{operator_for, standard::*};
use std::f64::consts::PI;

const EPSILON: f64 = 1e-10;

fn basis(index: usize, num_qubits: usize) -> Ket {
    Ket::basis(index, 1 << num_qubits).unwrap()
}

fn all_operations(n: usize) -> Vec<Operation> {
    vec![
        Operation::H { qubit: 0 },
        Operation::X { qubit: n - 1 },
        Operation::Y { qubit: 0 },
        Operation::Z { qubit: n - 1 },
        Operation::T { qubit: 0 },
        Operation::S { qubit: 0 },
        Operation::Phase { qubit: 0, theta: 0.3 },
        Operation::Rx { qubit: 0, theta: 1.1 },
        Operation::Ry { qubit: n - 1, theta: -0.4 },
        Operation::Rz { qubit: 0, theta: 2.2 },
        Operation::Cx { control: 0, target: n - 1 },
        Operation::Cz { control: n - 1, target: 0 },
        Operation::Cp { control: 0, target: n - 1, theta: 0.9 },
        Operation::Swap { qubit1: 0, qubit2: n - 1 },
    ]
}

// ============================================================================
// Structural properties
// ============================================================================

#[test]
fn test_every_gate_is_unitary() {
    for n in 2..=3 {
        for op in all_operations(n) {
            let matrix = operator_for(&op, n).unwrap().unwrap();
            assert_eq!(matrix.dim(), 1 << n, "{}", op);
            assert!(matrix.is_unitary().unwrap(), "{} is not unitary", op);
        }
    }
}

#[test]
fn test_self_inverse_gates() {
    let n = 3;
    let identity = Operator::identity(1 << n);
    for op in [
        hadamard(1, n).unwrap(),
        pauli_x(2, n).unwrap(),
        pauli_y(0, n).unwrap(),
        pauli_z(1, n).unwrap(),
        cnot(2, 0, n).unwrap(),
        cz(0, 1, n).unwrap(),
        swap(0, 2, n).unwrap(),
    ] {
        assert!(op.matmul(&op).unwrap().approx_eq(&identity, EPSILON));
    }
}

#[test]
fn test_pauli_algebra() {
    // XY = iZ on every qubit position
    for q in 0..3 {
        let xy = pauli_x(q, 3).unwrap().matmul(&pauli_y(q, 3).unwrap()).unwrap();
        let iz = pauli_z(q, 3).unwrap().scale(Complex64::new(0.0, 1.0));
        assert!(xy.approx_eq(&iz, EPSILON));
    }
}

#[test]
fn test_rotations_at_pi() {
    // RX(π) = -iX, RZ(π) = -iZ
    let minus_i = Complex64::new(0.0, -1.0);
    assert!(rx(0, PI, 2)
        .unwrap()
        .approx_eq(&pauli_x(0, 2).unwrap().scale(minus_i), EPSILON));
    assert!(rz(1, PI, 2)
        .unwrap()
        .approx_eq(&pauli_z(1, 2).unwrap().scale(minus_i), EPSILON));
}

// ============================================================================
// Bit-ordering convention
// ============================================================================

#[test]
fn test_x_flips_only_its_bit() {
    let n = 4;
    for q in 0..n {
        let out = pauli_x(q, n).unwrap().apply(&Ket::zero_state(n)).unwrap();
        assert_relative_eq!(out.get(1 << q).re, 1.0, epsilon = EPSILON);
    }
}

#[test]
fn test_cnot_flips_target_when_control_set() {
    let n = 3;
    let op = cnot(2, 0, n).unwrap();
    for i in 0..(1 << n) {
        let expected = if (i >> 2) & 1 == 1 { i ^ 1 } else { i };
        let out = op.apply(&basis(i, n)).unwrap();
        assert!(out.approx_eq(&basis(expected, n), EPSILON), "basis {}", i);
    }
}

#[test]
fn test_bell_state_from_h_and_cnot() {
    let h = hadamard(0, 2).unwrap();
    let cx = cnot(0, 1, 2).unwrap();
    let bell = cx.apply(&h.apply(&Ket::zero_state(2)).unwrap()).unwrap();
    let amp = std::f64::consts::FRAC_1_SQRT_2;
    assert!(bell.approx_eq(&Ket::from_real(&[amp, 0.0, 0.0, amp]), EPSILON));
}

// ============================================================================
// SWAP against the direct permutation
// ============================================================================

fn direct_swap(a: usize, b: usize, n: usize) -> Operator {
    let dim = 1usize << n;
    let rows: Vec<Vec<f64>> = (0..dim)
        .map(|r| {
            (0..dim)
                .map(|c| {
                    let bit_a = (c >> a) & 1;
                    let bit_b = (c >> b) & 1;
                    let mut swapped = c & !((1 << a) | (1 << b));
                    swapped |= (bit_a << b) | (bit_b << a);
                    if swapped == r {
                        1.0
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();
    Operator::from_real_rows(&rows).unwrap()
}

#[test]
fn test_swap_matches_direct_permutation() {
    for n in 2..=4 {
        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let built = swap(a, b, n).unwrap();
                assert!(
                    built.approx_eq(&direct_swap(a, b, n), EPSILON),
                    "swap({}, {}) on {} qubits",
                    a,
                    b,
                    n
                );
            }
        }
    }
}

// ============================================================================
// Controlled phases
// ============================================================================

#[test]
fn test_cp_is_symmetric_in_its_qubits() {
    let a = cp(0, 2, 0.42, 3).unwrap();
    let b = cp(2, 0, 0.42, 3).unwrap();
    assert!(a.approx_eq(&b, EPSILON));
}

#[test]
fn test_cz_negates_only_eleven() {
    let op = cz(0, 1, 2).unwrap();
    let expected = Operator::from_real_rows(&[
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, -1.0],
    ])
    .unwrap();
    assert!(op.approx_eq(&expected, EPSILON));
}

#[test]
fn test_t_and_s_phases() {
    let t = t_gate(0, 1).unwrap();
    let s = s_gate(0, 1).unwrap();
    assert_relative_eq!(t.get(1, 1).re, (PI / 4.0).cos(), epsilon = EPSILON);
    assert_relative_eq!(t.get(1, 1).im, (PI / 4.0).sin(), epsilon = EPSILON);
    assert_relative_eq!(s.get(1, 1).im, 1.0, epsilon = EPSILON);
}
