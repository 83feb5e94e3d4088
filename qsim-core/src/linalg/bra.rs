//! Row covectors

use super::{all_real, format_scalar, kron_vector, Ket};
use crate::{QuantumError, Result};
use nalgebra::DVector;
use num_complex::Complex64;
use std::fmt;

/// A covector ⟨φ|, the conjugate transpose of a ket
///
/// Entries are stored already conjugated, so `⟨φ|ψ⟩ = Σ φ_i ψ_i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bra {
    coef: DVector<Complex64>,
}

impl Bra {
    /// Create a bra from its (already conjugated) row entries
    pub fn new(coef: Vec<Complex64>) -> Self {
        Self {
            coef: DVector::from_vec(coef),
        }
    }

    pub fn from_real(coef: &[f64]) -> Self {
        Self {
            coef: DVector::from_iterator(coef.len(), coef.iter().map(|&x| Complex64::new(x, 0.0))),
        }
    }

    pub(crate) fn from_conjugated(coef: DVector<Complex64>) -> Self {
        Self { coef }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.coef.len()
    }

    /// Row entries as a slice
    pub fn as_slice(&self) -> &[Complex64] {
        self.coef.as_slice()
    }

    pub fn checked_add(&self, other: &Bra) -> Result<Bra> {
        self.check_dim("bra addition", other.dim())?;
        Ok(Bra::from_conjugated(&self.coef + &other.coef))
    }

    pub fn checked_sub(&self, other: &Bra) -> Result<Bra> {
        self.check_dim("bra subtraction", other.dim())?;
        Ok(Bra::from_conjugated(&self.coef - &other.coef))
    }

    pub fn scale(&self, scalar: impl Into<Complex64>) -> Bra {
        Bra::from_conjugated(&self.coef * scalar.into())
    }

    /// Conjugate transpose back to a ket
    pub fn dagger(&self) -> Ket {
        Ket::from_vector(self.coef.conjugate())
    }

    /// ⟨self|ket⟩
    ///
    /// # Errors
    /// Returns `DimensionMismatch` when the lengths differ.
    pub fn inner_product(&self, ket: &Ket) -> Result<Complex64> {
        self.check_dim("inner product", ket.dim())?;
        Ok(self
            .coef
            .iter()
            .zip(ket.amplitudes())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Kronecker product `self ⊗ others[0] ⊗ …`
    pub fn tensor(&self, others: &[&Bra]) -> Bra {
        let coef = others
            .iter()
            .fold(self.coef.clone(), |acc, next| kron_vector(&acc, &next.coef));
        Bra::from_conjugated(coef)
    }

    pub fn is_real(&self) -> bool {
        all_real(self.coef.iter())
    }

    pub fn approx_eq(&self, other: &Bra, tolerance: f64) -> bool {
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

impl fmt::Display for Bra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let real = self.is_real();
        let entries: Vec<String> = self.coef.iter().map(|z| format_scalar(z, real)).collect();
        write!(f, "Bra([{}])", entries.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dagger_roundtrip_conjugates() {
        let ket = Ket::new(vec![Complex64::new(1.0, 2.0), Complex64::new(0.0, -1.0)]);
        let bra = ket.dagger();
        assert_eq!(bra.as_slice()[0], Complex64::new(1.0, -2.0));
        assert_eq!(bra.dagger(), ket);
    }

    #[test]
    fn test_orthogonal_basis() {
        let zero = Ket::from_real(&[1.0, 0.0]);
        let one = Ket::from_real(&[0.0, 1.0]);
        let overlap = zero.dagger().inner_product(&one).unwrap();
        assert_relative_eq!(overlap.norm(), 0.0);
    }

    #[test]
    fn test_inner_product_dimension_mismatch() {
        let bra = Bra::from_real(&[1.0, 0.0]);
        let ket = Ket::zero_state(2);
        assert!(matches!(
            bra.inner_product(&ket),
            Err(QuantumError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_tensor_and_scale() {
        let a = Bra::from_real(&[1.0, 0.0]);
        let b = Bra::from_real(&[0.0, 1.0]);
        let product = a.tensor(&[&b]).scale(Complex64::new(0.0, 1.0));
        assert_eq!(product.dim(), 4);
        assert_eq!(product.as_slice()[1], Complex64::new(0.0, 1.0));
        assert!(!product.is_real());
    }

    #[test]
    fn test_add_sub() {
        let a = Bra::from_real(&[1.0, 1.0]);
        let b = Bra::from_real(&[1.0, -1.0]);
        let sum = a.checked_add(&b).unwrap();
        let diff = a.checked_sub(&b).unwrap();
        assert!(sum.approx_eq(&Bra::from_real(&[2.0, 0.0]), 1e-12));
        assert!(diff.approx_eq(&Bra::from_real(&[0.0, 2.0]), 1e-12));
        assert_eq!(format!("{}", sum), "Bra([2.000000, 0.000000])");
    }
}
