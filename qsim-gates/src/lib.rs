//! Quantum gate library for qsim
//!
//! - [`matrices`]: 2×2 matrices for the fixed and parameterized gates
//! - [`standard`]: full-system operators on specific qubits of an n-qubit register
//! - [`operator_for`]: dispatch from a circuit [`Operation`](qsim_core::Operation)
//!
//! Qubit 0 is the least-significant bit of the basis index.
//!
//! # Example
//!
//! ```
//! use qsim_gates::standard::{cnot, hadamard};
//!
//! let h = hadamard(0, 2).unwrap();
//! let cx = cnot(0, 1, 2).unwrap();
//! let bell = cx.matmul(&h).unwrap();
//! assert!(bell.is_unitary().unwrap());
//! ```

pub mod dispatch;
pub mod matrices;
pub mod standard;

pub use dispatch::{check_operands, operator_for};
pub use standard::*;
