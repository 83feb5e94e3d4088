//! Mixed-state layer for qsim
//!
//! - [`DensityMatrix`]: validated density matrices with fidelity, entropy and
//!   partial trace
//! - [`QuantumChannel`]: Kraus channels (amplitude damping, phase damping,
//!   depolarizing) and their tensor products
//! - [`teleport`]: single-qubit teleportation through a damped Bell pair
//!
//! # Example
//!
//! ```
//! use qsim_core::Ket;
//! use qsim_state::teleport;
//!
//! let report = teleport(&Ket::from_real(&[1.0, 0.0]), 0.0).unwrap();
//! assert!((report.average_fidelity - 1.0).abs() < 1e-6);
//! ```

pub mod channel;
pub mod density_matrix;
pub mod error;
pub mod teleportation;

pub use channel::QuantumChannel;
pub use density_matrix::DensityMatrix;
pub use error::{MixedStateViolation, Result, StateError};
pub use teleportation::{teleport, TeleportationOutcome, TeleportationReport};
