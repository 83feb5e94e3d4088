//! Partial trace over tensor-product subsystems

use super::Operator;
use crate::{QuantumError, Result};
use nalgebra::DMatrix;
use num_complex::Complex64;

impl Operator {
    /// Trace out every subsystem not listed in `keep`
    ///
    /// `dims` lists subsystem dimensions with subsystem 0 most significant.
    /// Kept subsystems appear in the result in the order given by `keep`, so
    /// `keep = [1, 0]` swaps the two factors. An empty `keep` yields the 1×1
    /// matrix holding the full trace.
    ///
    /// # Errors
    /// - `NotSquare` if the operator is rectangular
    /// - `DimensionMismatch` if `∏ dims` differs from the matrix size
    /// - `InvalidSubsystem` for an out-of-range or repeated entry in `keep`
    pub fn partial_trace(&self, keep: &[usize], dims: &[usize]) -> Result<Operator> {
        self.require_square()?;
        let total: usize = dims.iter().product();
        if total != self.dim() {
            return Err(QuantumError::dimension_mismatch(
                "partial trace",
                self.dim(),
                total,
            ));
        }

        let mut seen = vec![false; dims.len()];
        for &index in keep {
            if index >= dims.len() || seen[index] {
                return Err(QuantumError::InvalidSubsystem {
                    index,
                    count: dims.len(),
                });
            }
            seen[index] = true;
        }

        // strides[i] = ∏_{j > i} dims[j]
        let mut strides = vec![1usize; dims.len()];
        for i in (0..dims.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * dims[i + 1];
        }

        let kept_offsets = offsets(keep, dims, &strides);
        let traced: Vec<usize> = (0..dims.len()).filter(|i| !seen[*i]).collect();
        let traced_offsets = offsets(&traced, dims, &strides);

        let m = self.matrix();
        let reduced = DMatrix::from_fn(kept_offsets.len(), kept_offsets.len(), |r, c| {
            traced_offsets
                .iter()
                .map(|&t| m[(kept_offsets[r] + t, kept_offsets[c] + t)])
                .sum::<Complex64>()
        });
        Ok(Operator::new(reduced))
    }
}

/// Flat-index contribution of every joint value of `subsystems`, with the
/// first listed subsystem varying slowest
fn offsets(subsystems: &[usize], dims: &[usize], strides: &[usize]) -> Vec<usize> {
    subsystems.iter().fold(vec![0usize], |acc, &s| {
        acc.iter()
            .flat_map(|&base| (0..dims[s]).map(move |v| base + v * strides[s]))
            .collect()
    })
}
