//! Core types for the qsim quantum circuit simulator
//!
//! This crate provides the building blocks shared by the other crates:
//! - [`linalg`]: [`Ket`], [`Bra`] and [`Operator`] over `Complex64`
//! - [`Circuit`]: append-only operation log with measurement bindings
//! - [`Operation`]: the closed set of gate and measurement records
//! - [`GateDescriptor`]: serde ingestion of caller-supplied operations
//!
//! Qubit 0 is the least-significant bit of a basis-state index.
//!
//! # Example
//! ```
//! use qsim_core::Circuit;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(0).cx(0, 1);
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod circuit;
pub mod descriptor;
pub mod error;
pub mod linalg;
pub mod operation;

// Re-exports for convenience
pub use circuit::{Circuit, MeasurementBinding};
pub use descriptor::{GateDescriptor, MatrixEntry};
pub use error::QuantumError;
pub use linalg::{Bra, Ket, Operator};
pub use num_complex::Complex64;
pub use operation::{GateMatrix, Operation};

/// Type alias for results in qsim
pub type Result<T> = std::result::Result<T, QuantumError>;
