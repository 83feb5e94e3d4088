//! Density matrix representation for mixed quantum states
//!
//! A density matrix ρ is a positive semi-definite, Hermitian matrix with Tr(ρ) = 1.
//! For pure states: ρ = |ψ⟩⟨ψ|
//! For mixed states: ρ = Σᵢ pᵢ |ψᵢ⟩⟨ψᵢ|
//!
//! Every constructor and every operation returning a new `DensityMatrix`
//! re-validates those conditions, so a value of this type is always a
//! physical state up to numerical tolerance.
//!
//! # Key Properties
//!
//! - **Purity**: Tr(ρ²) ∈ (0, 1], equals 1 for pure states
//! - **Von Neumann Entropy**: S = -Tr(ρ ln ρ), measures mixedness
//! - **Partial Trace**: Extract subsystem density matrices
//!
//! # Example
//!
//! ```
//! use qsim_state::DensityMatrix;
//!
//! let dm = DensityMatrix::maximally_mixed(1).unwrap();
//! assert!((dm.purity() - 0.5).abs() < 1e-10);
//! ```

use crate::error::{MixedStateViolation, Result, StateError};
use num_complex::Complex64;
use qsim_core::{Ket, Operator};
use std::fmt;

/// Absolute and relative tolerance of the Hermitian check
const HERMITIAN_TOLERANCE: f64 = 1e-8;
const TRACE_TOLERANCE: f64 = 1e-8;
/// Most negative eigenvalue still accepted as round-off
const EIGENVALUE_FLOOR: f64 = -1e-9;

/// Validated density matrix
#[derive(Clone, PartialEq)]
pub struct DensityMatrix {
    rho: Operator,
}

impl DensityMatrix {
    /// Validate and wrap an operator
    ///
    /// # Errors
    /// Returns `InvalidMixedState` naming the first violated condition:
    /// squareness, hermiticity, unit trace, then positivity.
    pub fn new(rho: Operator) -> Result<Self> {
        validate(&rho)?;
        Ok(Self { rho })
    }

    /// Pure state ρ = |ψ⟩⟨ψ|
    ///
    /// Fails unless the ket is normalized.
    pub fn from_ket(ket: &Ket) -> Result<Self> {
        Self::new(ket.outer_product(&ket.dagger()))
    }

    /// Maximally mixed state ρ = I / 2^n
    pub fn maximally_mixed(num_qubits: usize) -> Result<Self> {
        let dimension = 1usize << num_qubits;
        Self::new(Operator::identity(dimension).scale(1.0 / dimension as f64))
    }

    /// Matrix dimension
    #[inline]
    pub fn dim(&self) -> usize {
        self.rho.dim()
    }

    /// Get a matrix element ρᵢⱼ
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.rho.get(row, col)
    }

    pub fn operator(&self) -> &Operator {
        &self.rho
    }

    pub fn into_operator(self) -> Operator {
        self.rho
    }

    /// U ρ U†
    pub fn evolve(&self, unitary: &Operator) -> Result<Self> {
        let evolved = unitary.matmul(&self.rho)?.matmul(&unitary.dagger())?;
        Self::new(evolved)
    }

    /// Uhlmann fidelity F(ρ, σ) = (Tr √(√ρ σ √ρ))²
    pub fn fidelity(&self, other: &DensityMatrix) -> Result<f64> {
        let sqrt_rho = self.rho.hermitian_part().sqrt_psd()?;
        let product = sqrt_rho.matmul(&other.rho)?.matmul(&sqrt_rho)?;
        let root_trace: f64 = product
            .hermitian_part()
            .eigenvalues_hermitian()?
            .into_iter()
            .map(|value| value.max(0.0).sqrt())
            .sum();
        Ok(root_trace * root_trace)
    }

    /// S = −Σ λᵢ ln λᵢ over strictly positive eigenvalues
    ///
    /// Zero for pure states, ln(d) for the maximally mixed state.
    pub fn von_neumann_entropy(&self) -> Result<f64> {
        Ok(self.rho.hermitian_part().von_neumann_entropy()?)
    }

    /// Reduced state on the `keep` subsystems
    ///
    /// See [`Operator::partial_trace`] for the index conventions.
    pub fn partial_trace(&self, keep: &[usize], dims: &[usize]) -> Result<Self> {
        Self::new(self.rho.partial_trace(keep, dims)?)
    }

    /// Calculate the purity: Tr(ρ²)
    ///
    /// Returns 1 for pure states, 1/d for the maximally mixed state.
    pub fn purity(&self) -> f64 {
        let dim = self.dim();
        let mut trace = Complex64::new(0.0, 0.0);

        // Tr(ρ²) = Σᵢⱼ ρᵢⱼ ρⱼᵢ
        for i in 0..dim {
            for j in 0..dim {
                trace += self.get(i, j) * self.get(j, i);
            }
        }

        trace.re
    }

    /// Real part of Tr(ρ)
    pub fn trace(&self) -> f64 {
        (0..self.dim()).map(|i| self.get(i, i).re).sum()
    }

    /// Born-rule probability Re Tr(M ρ), clamped at zero
    pub fn probability(&self, projector: &Operator) -> Result<f64> {
        let weighted = projector.matmul(&self.rho)?;
        Ok(weighted.trace()?.re.max(0.0))
    }
}

fn violation(v: MixedStateViolation) -> Result<()> {
    Err(StateError::InvalidMixedState(v))
}

fn validate(rho: &Operator) -> Result<()> {
    if !rho.is_square() {
        return violation(MixedStateViolation::NotSquare {
            rows: rho.nrows(),
            cols: rho.ncols(),
        });
    }

    let adjoint = rho.dagger();
    let mut deviation: f64 = 0.0;
    let mut hermitian = true;
    for (a, b) in rho.matrix().iter().zip(adjoint.matrix().iter()) {
        let diff = (a - b).norm();
        deviation = deviation.max(diff);
        if diff > HERMITIAN_TOLERANCE + HERMITIAN_TOLERANCE * b.norm() {
            hermitian = false;
        }
    }
    if !hermitian {
        return violation(MixedStateViolation::NotHermitian { deviation });
    }

    let trace = rho.trace()?;
    if (trace - Complex64::new(1.0, 0.0)).norm() > TRACE_TOLERANCE {
        return violation(MixedStateViolation::TraceNotOne { trace: trace.re });
    }

    let min_eigenvalue = rho
        .hermitian_part()
        .eigenvalues_hermitian()?
        .first()
        .copied()
        .unwrap_or(0.0);
    if min_eigenvalue < EIGENVALUE_FLOOR {
        return violation(MixedStateViolation::NotPositive { min_eigenvalue });
    }

    Ok(())
}

impl fmt::Debug for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix {{ dim: {}, purity: {:.4} }}",
            self.dim(),
            self.purity()
        )
    }
}

impl fmt::Display for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rho)
    }
}
