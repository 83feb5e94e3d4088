//! Kraus-representation quantum channels
//!
//! A channel is an ordered set of Kraus operators {Kᵢ}; applying it to ρ gives
//! Σ Kᵢ ρ Kᵢ†.
//!
//! # Kraus Operators
//! ```text
//! amplitude damping:  K₀ = [[1, 0], [0, √(1-γ)]]   K₁ = [[0, √γ], [0, 0]]
//! phase damping:      K₀ = [[1, 0], [0, √(1-γ)]]   K₁ = [[0, 0], [0, √γ]]
//! depolarizing:       K₀ = √(1-p) I   K₁ = √(p/3) X   K₂ = √(p/3) Y   K₃ = √(p/3) Z
//! ```

use crate::density_matrix::DensityMatrix;
use crate::error::{Result, StateError};
use qsim_core::Operator;
use qsim_gates::matrices;

/// Tolerance of the advisory completeness check
const COMPLETENESS_TOLERANCE: f64 = 1e-10;

/// Completely positive map in Kraus form
#[derive(Clone, Debug, PartialEq)]
pub struct QuantumChannel {
    kraus: Vec<Operator>,
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(StateError::InvalidParameter { name, value });
    }
    Ok(())
}

impl QuantumChannel {
    /// Channel from explicit Kraus operators
    ///
    /// Trace preservation is not checked; see [`QuantumChannel::is_trace_preserving`].
    pub fn new(kraus: Vec<Operator>) -> Self {
        Self { kraus }
    }

    /// The identity channel on a `dim`-dimensional space
    pub fn identity(dim: usize) -> Self {
        Self::new(vec![Operator::identity(dim)])
    }

    /// Single-qubit amplitude damping with decay probability γ
    ///
    /// # Errors
    /// Returns `InvalidParameter` unless 0 ≤ γ ≤ 1.
    pub fn amplitude_damping(gamma: f64) -> Result<Self> {
        check_unit_interval("gamma", gamma)?;
        let k0 = Operator::from_real_rows(&[vec![1.0, 0.0], vec![0.0, (1.0 - gamma).sqrt()]])?;
        let k1 = Operator::from_real_rows(&[vec![0.0, gamma.sqrt()], vec![0.0, 0.0]])?;
        Ok(Self::new(vec![k0, k1]))
    }

    /// Single-qubit depolarizing channel with error probability p
    pub fn depolarizing(p: f64) -> Result<Self> {
        check_unit_interval("p", p)?;
        let weight = (p / 3.0).sqrt();
        Ok(Self::new(vec![
            Operator::from_array2(&matrices::IDENTITY).scale((1.0 - p).sqrt()),
            Operator::from_array2(&matrices::PAULI_X).scale(weight),
            Operator::from_array2(&matrices::PAULI_Y).scale(weight),
            Operator::from_array2(&matrices::PAULI_Z).scale(weight),
        ]))
    }

    /// Single-qubit phase damping with probability γ
    pub fn phase_damping(gamma: f64) -> Result<Self> {
        check_unit_interval("gamma", gamma)?;
        let k0 = Operator::from_real_rows(&[vec![1.0, 0.0], vec![0.0, (1.0 - gamma).sqrt()]])?;
        let k1 = Operator::from_real_rows(&[vec![0.0, 0.0], vec![0.0, gamma.sqrt()]])?;
        Ok(Self::new(vec![k0, k1]))
    }

    pub fn kraus_operators(&self) -> &[Operator] {
        &self.kraus
    }

    /// Composite channel `self ⊗ other` with Kraus set {Aᵢ ⊗ Bⱼ}
    ///
    /// The receiver's index varies slowest.
    pub fn tensor(&self, other: &QuantumChannel) -> QuantumChannel {
        let kraus = self
            .kraus
            .iter()
            .flat_map(|a| other.kraus.iter().map(move |b| a.tensor(&[b])))
            .collect();
        QuantumChannel::new(kraus)
    }

    /// Σ Kᵢ† Kᵢ = I
    pub fn is_trace_preserving(&self) -> bool {
        let Some(first) = self.kraus.first() else {
            return false;
        };
        let dim = first.ncols();
        let mut sum = Operator::zeros(dim);
        for k in &self.kraus {
            match k.dagger().matmul(k).and_then(|term| sum.checked_add(&term)) {
                Ok(next) => sum = next,
                Err(_) => return false,
            }
        }
        sum.approx_eq(&Operator::identity(dim), COMPLETENESS_TOLERANCE)
    }

    /// Σ Kᵢ ρ Kᵢ†, re-validated as a density matrix
    ///
    /// # Errors
    /// Dimension mismatches between ρ and the Kraus operators, or an output
    /// that is not a valid state (for instance from a non trace-preserving set).
    pub fn apply(&self, rho: &DensityMatrix) -> Result<DensityMatrix> {
        let mut out = Operator::zeros(rho.dim());
        for k in &self.kraus {
            let term = k.matmul(rho.operator())?.matmul(&k.dagger())?;
            out = out.checked_add(&term)?;
        }
        DensityMatrix::new(out)
    }
}
