//! Deferred sampling of terminal measurements
//!
//! When every measurement sits at the end of the circuit, one pure run gives
//! the full outcome distribution |amplitude|². Shots are then drawn from it
//! in fixed-size chunks, each with its own generator derived from the master
//! seed, so parallel and sequential runs produce the same counts.

use crate::cancel::CancellationToken;
use crate::error::{Result, SimulatorError};
use crate::register;
use qsim_core::{Ket, MeasurementBinding};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashMap;

/// Shots drawn per generator
pub const CHUNK_SIZE: usize = 1024;

/// |amplitude|² with drift below zero clamped, renormalized to sum 1
///
/// # Errors
/// `MeasurementFailed` if no basis state has positive weight.
pub fn outcome_distribution(state: &Ket) -> Result<Vec<f64>> {
    let mut probabilities: Vec<f64> = state
        .probabilities()
        .into_iter()
        .map(|p| if p.is_finite() { p.max(0.0) } else { 0.0 })
        .collect();
    let total: f64 = probabilities.iter().sum();
    if total <= 0.0 {
        return Err(SimulatorError::MeasurementFailed(
            "state has no outcome with positive probability".to_string(),
        ));
    }
    probabilities.iter_mut().for_each(|p| *p /= total);
    Ok(probabilities)
}

/// One chunk of the sampling work
#[derive(Debug, Clone, Copy)]
pub(crate) struct Chunk {
    pub seed: u64,
    pub shots: usize,
}

/// Split `shots` into chunks seeded in order from `seeds`
pub(crate) fn chunks(shots: usize, mut seeds: impl FnMut() -> u64) -> Vec<Chunk> {
    let mut out = Vec::with_capacity((shots + CHUNK_SIZE - 1) / CHUNK_SIZE);
    let mut remaining = shots;
    while remaining > 0 {
        let size = remaining.min(CHUNK_SIZE);
        out.push(Chunk {
            seed: seeds(),
            shots: size,
        });
        remaining -= size;
    }
    out
}

fn sample_chunk(
    distribution: &WeightedIndex<f64>,
    bindings: &[MeasurementBinding],
    chunk: Chunk,
    token: &CancellationToken,
) -> Result<HashMap<String, usize>> {
    token.check()?;
    let mut rng = StdRng::seed_from_u64(chunk.seed);
    let mut counts = HashMap::new();
    for _ in 0..chunk.shots {
        let index = distribution.sample(&mut rng);
        if let Some(bits) = register::from_basis_index(bindings, index) {
            *counts.entry(bits).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

pub(crate) fn merge_counts(
    mut left: HashMap<String, usize>,
    right: HashMap<String, usize>,
) -> HashMap<String, usize> {
    for (bits, count) in right {
        *left.entry(bits).or_insert(0) += count;
    }
    left
}

/// Draw every chunk from `probabilities` and tally the register strings
pub(crate) fn sample_counts(
    probabilities: &[f64],
    bindings: &[MeasurementBinding],
    chunks: &[Chunk],
    parallel: bool,
    token: &CancellationToken,
) -> Result<HashMap<String, usize>> {
    let distribution = WeightedIndex::new(probabilities)
        .map_err(|e| SimulatorError::MeasurementFailed(e.to_string()))?;

    if parallel {
        chunks
            .par_iter()
            .map(|&chunk| sample_chunk(&distribution, bindings, chunk, token))
            .try_reduce(HashMap::new, |a, b| Ok(merge_counts(a, b)))
    } else {
        chunks.iter().try_fold(HashMap::new(), |acc, &chunk| {
            Ok(merge_counts(
                acc,
                sample_chunk(&distribution, bindings, chunk, token)?,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn identity_bindings(n: usize) -> Vec<MeasurementBinding> {
        (0..n).map(|q| MeasurementBinding { qubit: q, cbit: q }).collect()
    }

    #[test]
    fn test_distribution_renormalizes() {
        let state = Ket::from_real(&[1.0, 1.0]);
        let probabilities = outcome_distribution(&state).unwrap();
        assert!((probabilities[0] - 0.5).abs() < 1e-12);
        assert!((probabilities[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_distribution_rejects_zero_state() {
        let state = Ket::new(vec![Complex64::new(0.0, 0.0); 4]);
        assert!(matches!(
            outcome_distribution(&state),
            Err(SimulatorError::MeasurementFailed(_))
        ));
    }

    #[test]
    fn test_chunks_cover_all_shots() {
        let mut next = 0;
        let chunks = chunks(2 * CHUNK_SIZE + 5, || {
            next += 1;
            next
        });
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.iter().map(|c| c.shots).sum::<usize>(), 2 * CHUNK_SIZE + 5);
        assert_eq!(chunks[2].seed, 3);
        assert!(super::chunks(0, || 0).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let probabilities = [0.1, 0.2, 0.3, 0.4];
        let bindings = identity_bindings(2);
        let chunks = chunks(5000, {
            let mut seed = 100;
            move || {
                seed += 1;
                seed
            }
        });
        let token = CancellationToken::new();

        let sequential = sample_counts(&probabilities, &bindings, &chunks, false, &token).unwrap();
        let parallel = sample_counts(&probabilities, &bindings, &chunks, true, &token).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.values().sum::<usize>(), 5000);
    }

    #[test]
    fn test_definite_state_samples_one_outcome() {
        let probabilities = [0.0, 0.0, 0.0, 1.0];
        let chunks = chunks(100, || 7);
        let counts = sample_counts(
            &probabilities,
            &identity_bindings(2),
            &chunks,
            false,
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(counts.get("11"), Some(&100));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_cancelled_sampling() {
        let token = CancellationToken::new();
        token.cancel();
        let result = sample_counts(&[1.0], &identity_bindings(1), &chunks(10, || 0), true, &token);
        assert_eq!(result, Err(SimulatorError::Cancelled));
    }
}
