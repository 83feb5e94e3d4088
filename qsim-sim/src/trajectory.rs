//! Single-trajectory execution with projective collapse

use crate::cancel::CancellationToken;
use crate::error::{Result, SimulatorError};
use crate::program::{Program, Step};
use num_complex::Complex64;
use qsim_core::Ket;
use rand::Rng;

/// Final state of one run plus the classical bits it recorded
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub state: Ket,
    /// `(cbit, value)` in recording order
    pub bits: Vec<(usize, u8)>,
}

/// Run `program` once from |0…0⟩
///
/// With `collapse` set, measurement steps draw an outcome from `rng` and
/// project the state; otherwise they are passed over and the run stays pure.
///
/// # Errors
/// - `Cancelled` if `token` fires between steps
/// - `OperationFailed` if a step cannot be applied
/// - `MeasurementFailed` if the drawn outcome has zero probability
pub fn run_trajectory<R: Rng>(
    program: &Program,
    rng: &mut R,
    token: &CancellationToken,
    collapse: bool,
) -> Result<Trajectory> {
    let mut state = Ket::zero_state(program.num_qubits());
    let mut bits = Vec::new();

    for step in program.steps() {
        token.check()?;
        match step {
            Step::Measure { index, qubit, cbit } if collapse => {
                let (outcome, collapsed) = measure(&state, *qubit, rng.gen::<f64>(), *index)?;
                state = collapsed;
                bits.push((*cbit, outcome));
            },
            _ => state = program.apply(step, state)?,
        }
    }

    Ok(Trajectory { state, bits })
}

/// Projective measurement of `qubit` driven by a uniform draw `r ∈ [0, 1)`
///
/// P(0) is the weight of the basis states with bit `qubit` clear, which equals
/// Re⟨ψ|M₀|ψ⟩ for the embedded projector M₀ = |0⟩⟨0|. It is clamped to
/// [0, 1] and outcome 0 is chosen iff `r < P(0)`. The returned state keeps the
/// amplitudes matching the outcome, scaled by 1/√p.
pub(crate) fn measure(state: &Ket, qubit: usize, r: f64, index: usize) -> Result<(u8, Ket)> {
    let mask = 1usize << qubit;
    let amplitudes = state.amplitudes();

    let p0 = amplitudes
        .iter()
        .enumerate()
        .filter(|(i, _)| i & mask == 0)
        .map(|(_, a)| a.norm_sqr())
        .sum::<f64>()
        .clamp(0.0, 1.0);

    let (outcome, probability) = if r < p0 { (0u8, p0) } else { (1u8, 1.0 - p0) };
    if probability <= 0.0 {
        return Err(SimulatorError::MeasurementFailed(format!(
            "operation {}: outcome {} drawn with zero probability",
            index, outcome
        )));
    }

    let keep = if outcome == 0 { 0 } else { mask };
    let scale = 1.0 / probability.sqrt();
    let collapsed: Vec<Complex64> = amplitudes
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            if i & mask == keep {
                a * scale
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
        .collect();
    Ok((outcome, Ket::new(collapsed)))
}
