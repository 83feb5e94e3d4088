//! Quantum circuit simulation engine
//!
//! This crate runs [`qsim_core::Circuit`]s against dense full-system operators
//! from `qsim-gates`. Each run compiles the circuit once and then takes one of
//! three paths:
//!
//! - **Statevector**: no measurements at all, the final amplitudes are returned
//! - **Trajectories**: a measurement is followed by further gates, so every shot
//!   evolves and collapses its own state
//! - **Deferred sampling**: measurements only at the end, so one pure run is
//!   sampled `shots` times
//!
//! # Features
//!
//! - **Auto-measure**: circuits without measurements are measured qubit-by-qubit
//! - **Parallel shots**: rayon map-reduce with per-shot seeds, deterministic
//!   for a fixed seed whether parallel or not
//! - **Cancellation**: cooperative, checked between shots and operations
//! - **JSON bodies**: [`SimulationRequest`] in, [`SimulationResponse`] out
//!
//! # Example
//!
//! ```
//! use qsim_core::Circuit;
//! use qsim_sim::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig {
//!     shots: 500,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let simulator = Simulator::new(config)?;
//!
//! let mut circuit = Circuit::new(2);
//! circuit.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
//!
//! let result = simulator.run(&circuit)?;
//! let counts = result.counts().expect("measured circuit");
//! assert_eq!(counts.get("01") + counts.get("10"), 0);
//! # Ok::<(), qsim_sim::SimulatorError>(())
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod program;
pub mod register;
pub mod request;
pub mod result;
pub mod sampling;
pub mod simulator;
pub mod statistics;
pub mod trajectory;

pub use cancel::CancellationToken;
pub use config::{SimulatorConfig, OPERATOR_WORKSPACE, QUBIT_CEILING};
pub use error::{Result, SimulatorError};
pub use program::{ExecutionPath, Program, Step};
pub use request::{SimulationRequest, SimulationResponse};
pub use result::{MeasurementCounts, SimulationOutcome, SimulationResult};
pub use simulator::Simulator;
pub use statistics::ExecutionStatistics;
pub use trajectory::{run_trajectory, Trajectory};
