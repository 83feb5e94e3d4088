//! Noisy single-qubit teleportation on density matrices
//!
//! Register layout, most significant tensor factor first:
//!
//! ```text
//! qubit 2 (payload) ── ● ── H ── M
//! qubit 1 (Alice)   ── ⊕ ──────── M
//! qubit 0 (Bob)     ─────────────── correction
//! ```
//!
//! Alice and Bob start in |Φ+⟩. Before the protocol runs, both halves of the
//! pair pass through an amplitude-damping channel of strength γ.

use crate::channel::QuantumChannel;
use crate::density_matrix::DensityMatrix;
use crate::error::{Result, StateError};
use qsim_core::{Ket, Operator};
use qsim_gates::{matrices, standard};
use tracing::debug;

const PAYLOAD: usize = 2;
const ALICE: usize = 1;
/// Outcomes below this probability are not reported
const NEGLIGIBLE_PROBABILITY: f64 = 1e-10;

/// Result for one measurement outcome of Alice's two qubits
#[derive(Debug, Clone)]
pub struct TeleportationOutcome {
    /// Measured bits, payload first (`"01"` means payload 0, Alice 1)
    pub bits: &'static str,
    pub probability: f64,
    /// Bob's state after the correction
    pub state: DensityMatrix,
    /// Fidelity of `state` against the payload
    pub fidelity: f64,
}

#[derive(Debug, Clone)]
pub struct TeleportationReport {
    pub gamma: f64,
    /// Renormalized outcome probabilities in the order 00, 01, 10, 11
    pub probabilities: [f64; 4],
    /// Outcomes with non-negligible probability
    pub outcomes: Vec<TeleportationOutcome>,
    /// Σ p · F over the reported outcomes
    pub average_fidelity: f64,
}

/// Teleport `payload` through a Bell pair damped with strength `gamma`
///
/// # Errors
/// - `InvalidPayload` unless the payload is a 2-dimensional ket
/// - `InvalidMixedState` if the payload is not normalized
/// - `InvalidParameter` unless 0 ≤ γ ≤ 1
pub fn teleport(payload: &Ket, gamma: f64) -> Result<TeleportationReport> {
    if payload.dim() != 2 {
        return Err(StateError::InvalidPayload(format!(
            "expected a single-qubit ket, got dimension {}",
            payload.dim()
        )));
    }
    let damping = QuantumChannel::amplitude_damping(gamma)?;
    let target = DensityMatrix::from_ket(payload)?;

    let bell = Ket::from_real(&[1.0, 0.0, 0.0, 1.0]).scale(std::f64::consts::FRAC_1_SQRT_2);
    let mut rho = DensityMatrix::from_ket(&payload.tensor(&[&bell]))?;

    if gamma > 0.0 {
        let noise = QuantumChannel::identity(2).tensor(&damping).tensor(&damping);
        rho = noise.apply(&rho)?;
    }

    let rho = rho
        .evolve(&standard::cnot(PAYLOAD, ALICE, 3)?)?
        .evolve(&standard::hadamard(PAYLOAD, 3)?)?;

    let p0 = Operator::from_array2(&matrices::PROJECTOR_ZERO);
    let p1 = Operator::from_array2(&matrices::PROJECTOR_ONE);
    let bob_identity = Operator::identity(2);
    let x = Operator::from_array2(&matrices::PAULI_X);
    let z = Operator::from_array2(&matrices::PAULI_Z);

    let branches = [
        ("00", p0.tensor(&[&p0, &bob_identity]), Operator::identity(2)),
        ("01", p0.tensor(&[&p1, &bob_identity]), x.clone()),
        ("10", p1.tensor(&[&p0, &bob_identity]), z.clone()),
        ("11", p1.tensor(&[&p1, &bob_identity]), x.matmul(&z)?),
    ];

    let mut probabilities = [0.0; 4];
    for (slot, (_, projector, _)) in probabilities.iter_mut().zip(branches.iter()) {
        *slot = rho.probability(projector)?;
    }
    let total: f64 = probabilities.iter().sum();
    if total > 0.0 {
        probabilities.iter_mut().for_each(|p| *p /= total);
    }
    debug!(gamma, ?probabilities, "teleportation outcome probabilities");

    let mut outcomes = Vec::with_capacity(4);
    for ((bits, projector, correction), &probability) in branches.iter().zip(probabilities.iter()) {
        if probability <= NEGLIGIBLE_PROBABILITY {
            continue;
        }
        let collapsed = projector
            .matmul(rho.operator())?
            .matmul(projector)?
            .scale(1.0 / probability);
        let bob = DensityMatrix::new(collapsed)?.partial_trace(&[2], &[2, 2, 2])?;
        let state = bob.evolve(correction)?;
        let fidelity = state.fidelity(&target)?;
        debug!(outcome = *bits, probability, fidelity, "teleportation branch");
        outcomes.push(TeleportationOutcome {
            bits: *bits,
            probability,
            state,
            fidelity,
        });
    }

    let average_fidelity = outcomes.iter().map(|o| o.probability * o.fidelity).sum();
    Ok(TeleportationReport {
        gamma,
        probabilities,
        outcomes,
        average_fidelity,
    })
}
