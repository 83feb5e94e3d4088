//! Column state vectors

use super::{all_real, format_scalar, kron_vector, Bra, Operator};
use crate::{QuantumError, Result};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use std::fmt;

/// A pure state |ψ⟩ as a complex column vector
///
/// The ket is not required to be normalized. For an n-qubit register the
/// vector has length 2^n and qubit 0 is the least-significant bit of the
/// basis-state index.
///
/// # Example
/// ```
/// use qsim_core::linalg::Ket;
///
/// let zero = Ket::from_real(&[1.0, 0.0]);
/// let one = Ket::from_real(&[0.0, 1.0]);
/// let plus = zero.checked_add(&one).unwrap().scale(1.0 / 2.0_f64.sqrt());
/// assert!((plus.norm() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Ket {
    coef: DVector<Complex64>,
}

impl Ket {
    /// Create a ket from complex amplitudes
    pub fn new(coef: Vec<Complex64>) -> Self {
        Self {
            coef: DVector::from_vec(coef),
        }
    }

    /// Create a ket from real amplitudes
    pub fn from_real(coef: &[f64]) -> Self {
        Self {
            coef: DVector::from_iterator(coef.len(), coef.iter().map(|&x| Complex64::new(x, 0.0))),
        }
    }

    /// Wrap an existing nalgebra column vector
    pub fn from_vector(coef: DVector<Complex64>) -> Self {
        Self { coef }
    }

    /// Computational basis vector |index⟩ of the given dimension
    pub fn basis(index: usize, dim: usize) -> Result<Self> {
        if index >= dim {
            return Err(QuantumError::UnsupportedOperation(format!(
                "basis index {} out of range for dimension {}",
                index, dim
            )));
        }
        let mut coef = DVector::zeros(dim);
        coef[index] = Complex64::new(1.0, 0.0);
        Ok(Self { coef })
    }

    /// The register state |0…0⟩ on `num_qubits` qubits
    pub fn zero_state(num_qubits: usize) -> Self {
        let mut coef = DVector::zeros(1usize << num_qubits);
        coef[0] = Complex64::new(1.0, 0.0);
        Self { coef }
    }

    /// Vector length
    #[inline]
    pub fn dim(&self) -> usize {
        self.coef.len()
    }

    /// Amplitude at a basis index
    #[inline]
    pub fn get(&self, index: usize) -> Complex64 {
        self.coef[index]
    }

    /// Underlying column vector
    pub fn as_vector(&self) -> &DVector<Complex64> {
        &self.coef
    }

    /// Amplitudes as a slice
    pub fn amplitudes(&self) -> &[Complex64] {
        self.coef.as_slice()
    }

    pub fn into_vector(self) -> DVector<Complex64> {
        self.coef
    }

    /// Σ |ψ_i|²
    pub fn norm_sqr(&self) -> f64 {
        self.coef.iter().map(|z| z.norm_sqr()).sum()
    }

    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Rescale to unit norm
    ///
    /// # Errors
    /// Fails for the zero vector.
    pub fn normalized(&self) -> Result<Self> {
        let norm = self.norm();
        if norm <= f64::EPSILON {
            return Err(QuantumError::UnsupportedOperation(
                "cannot normalize a zero vector".to_string(),
            ));
        }
        Ok(self.scale(1.0 / norm))
    }

    /// Squared magnitude of every amplitude
    pub fn probabilities(&self) -> Vec<f64> {
        self.coef.iter().map(|z| z.norm_sqr()).collect()
    }

    /// Elementwise sum
    ///
    /// # Errors
    /// Returns `DimensionMismatch` when the lengths differ.
    pub fn checked_add(&self, other: &Ket) -> Result<Ket> {
        self.check_dim("ket addition", other.dim())?;
        Ok(Ket::from_vector(&self.coef + &other.coef))
    }

    /// Elementwise difference
    pub fn checked_sub(&self, other: &Ket) -> Result<Ket> {
        self.check_dim("ket subtraction", other.dim())?;
        Ok(Ket::from_vector(&self.coef - &other.coef))
    }

    /// Scalar multiple
    pub fn scale(&self, scalar: impl Into<Complex64>) -> Ket {
        Ket::from_vector(&self.coef * scalar.into())
    }

    /// Conjugate transpose ⟨ψ|
    pub fn dagger(&self) -> Bra {
        Bra::from_conjugated(self.coef.conjugate())
    }

    /// Scalar ⟨φ|ψ⟩ for the covector ⟨φ|
    pub fn inner_product(&self, bra: &Bra) -> Result<Complex64> {
        bra.inner_product(self)
    }

    /// Operator |ψ⟩⟨φ|
    pub fn outer_product(&self, bra: &Bra) -> Operator {
        let row = bra.as_slice();
        Operator::new(DMatrix::from_fn(self.dim(), row.len(), |r, c| {
            self.coef[r] * row[c]
        }))
    }

    /// Kronecker product `self ⊗ others[0] ⊗ others[1] ⊗ …`
    pub fn tensor(&self, others: &[&Ket]) -> Ket {
        let coef = others
            .iter()
            .fold(self.coef.clone(), |acc, next| kron_vector(&acc, &next.coef));
        Ket::from_vector(coef)
    }

    /// True when every imaginary part is numerically zero
    pub fn is_real(&self) -> bool {
        all_real(self.coef.iter())
    }

    /// Elementwise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &Ket, tolerance: f64) -> bool {
        self.dim() == other.dim()
            && self
                .coef
                .iter()
                .zip(other.coef.iter())
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    fn check_dim(&self, op: &'static str, actual: usize) -> Result<()> {
        if self.dim() != actual {
            return Err(QuantumError::dimension_mismatch(op, self.dim(), actual));
        }
        Ok(())
    }
}

impl fmt::Display for Ket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let real = self.is_real();
        let entries: Vec<String> = self.coef.iter().map(|z| format_scalar(z, real)).collect();
        write!(f, "Ket([{}])", entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_state() {
        let ket = Ket::zero_state(3);
        assert_eq!(ket.dim(), 8);
        assert_eq!(ket.get(0), Complex64::new(1.0, 0.0));
        assert_relative_eq!(ket.norm(), 1.0);
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let a = Ket::from_real(&[1.0, 0.0]);
        let b = Ket::from_real(&[1.0, 0.0, 0.0, 0.0]);
        let err = a.checked_add(&b).unwrap_err();
        assert!(matches!(err, QuantumError::DimensionMismatch { expected: 2, actual: 4, .. }));
    }

    #[test]
    fn test_sub_and_scale() {
        let a = Ket::from_real(&[1.0, 2.0]);
        let b = Ket::from_real(&[0.5, 0.5]);
        let diff = a.checked_sub(&b).unwrap().scale(2.0);
        assert!(diff.approx_eq(&Ket::from_real(&[1.0, 3.0]), 1e-12));
    }

    #[test]
    fn test_inner_product_conjugates() {
        let psi = Ket::new(vec![Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)]);
        let value = psi.inner_product(&psi.dagger()).unwrap();
        assert_relative_eq!(value.re, 1.0);
        assert_relative_eq!(value.im, 0.0);
    }

    #[test]
    fn test_outer_product_projector() {
        let zero = Ket::from_real(&[1.0, 0.0]);
        let projector = zero.outer_product(&zero.dagger());
        assert_eq!(projector.get(0, 0), Complex64::new(1.0, 0.0));
        assert_eq!(projector.get(1, 1), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_tensor_is_order_preserving() {
        let zero = Ket::from_real(&[1.0, 0.0]);
        let one = Ket::from_real(&[0.0, 1.0]);
        // |1⟩ ⊗ |0⟩ ⊗ |0⟩ = |100⟩
        let state = one.tensor(&[&zero, &zero]);
        assert_eq!(state.dim(), 8);
        assert_eq!(state.get(4), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_is_real_cleanup() {
        let ket = Ket::new(vec![Complex64::new(0.5, 1e-14), Complex64::new(0.5, -1e-14)]);
        assert!(ket.is_real());
        assert!(ket.approx_eq(&Ket::from_real(&[0.5, 0.5]), 1e-8));
        assert_eq!(format!("{}", ket), "Ket([0.500000, 0.500000])");
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        assert!(Ket::from_real(&[0.0, 0.0]).normalized().is_err());
    }

    #[test]
    fn test_basis_out_of_range() {
        assert!(Ket::basis(2, 2).is_err());
        assert_eq!(Ket::basis(3, 4).unwrap().get(3), Complex64::new(1.0, 0.0));
    }
}
