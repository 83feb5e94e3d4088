//! Linear operators

use super::{all_real, format_scalar, kron_matrix, Ket, TOLERANCE};
use crate::{QuantumError, Result};
use nalgebra::DMatrix;
use num_complex::Complex64;
use std::fmt;

/// Tolerance of the advisory structural predicates
const PREDICATE_TOLERANCE: f64 = 1e-10;

/// A complex matrix acting on kets by left multiplication
///
/// No structural invariant is enforced: non-unitary custom gates and
/// rectangular intermediates are representable. The Hermitian, normal and
/// unitary predicates are advisory.
#[derive(Clone, Debug, PartialEq)]
pub struct Operator {
    data: DMatrix<Complex64>,
}

impl Operator {
    pub fn new(data: DMatrix<Complex64>) -> Self {
        Self { data }
    }

    /// Build from row-major complex entries
    ///
    /// # Errors
    /// Returns `DimensionMismatch` for ragged rows.
    pub fn from_rows(rows: &[Vec<Complex64>]) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != ncols) {
            return Err(QuantumError::dimension_mismatch(
                "operator rows",
                ncols,
                bad.len(),
            ));
        }
        Ok(Self::new(DMatrix::from_fn(rows.len(), ncols, |r, c| {
            rows[r][c]
        })))
    }

    /// Build from row-major real entries
    pub fn from_real_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let rows: Vec<Vec<Complex64>> = rows
            .iter()
            .map(|row| row.iter().map(|&x| Complex64::new(x, 0.0)).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Wrap a 2×2 gate matrix
    pub fn from_array2(m: &[[Complex64; 2]; 2]) -> Self {
        Self::new(DMatrix::from_fn(2, 2, |r, c| m[r][c]))
    }

    pub fn identity(dim: usize) -> Self {
        Self::new(DMatrix::identity(dim, dim))
    }

    pub fn zeros(dim: usize) -> Self {
        Self::new(DMatrix::zeros(dim, dim))
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Row count; equals the Hilbert-space dimension for square operators
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_square(&self) -> bool {
        self.data.is_square()
    }

    pub fn matrix(&self) -> &DMatrix<Complex64> {
        &self.data
    }

    pub fn into_matrix(self) -> DMatrix<Complex64> {
        self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[(row, col)]
    }

    pub fn checked_add(&self, other: &Operator) -> Result<Operator> {
        self.check_same_shape("operator addition", other)?;
        Ok(Operator::new(&self.data + &other.data))
    }

    pub fn checked_sub(&self, other: &Operator) -> Result<Operator> {
        self.check_same_shape("operator subtraction", other)?;
        Ok(Operator::new(&self.data - &other.data))
    }

    pub fn scale(&self, scalar: impl Into<Complex64>) -> Operator {
        Operator::new(&self.data * scalar.into())
    }

    /// Matrix product `self · other`
    pub fn matmul(&self, other: &Operator) -> Result<Operator> {
        if self.ncols() != other.nrows() {
            return Err(QuantumError::dimension_mismatch(
                "operator product",
                self.ncols(),
                other.nrows(),
            ));
        }
        Ok(Operator::new(&self.data * &other.data))
    }

    /// Matrix action on a ket
    ///
    /// # Errors
    /// Returns `DimensionMismatch` when the ket length differs from the column count.
    pub fn apply(&self, ket: &Ket) -> Result<Ket> {
        if self.ncols() != ket.dim() {
            return Err(QuantumError::dimension_mismatch(
                "operator action",
                self.ncols(),
                ket.dim(),
            ));
        }
        Ok(Ket::from_vector(&self.data * ket.as_vector()))
    }

    /// Conjugate transpose
    pub fn dagger(&self) -> Operator {
        Operator::new(self.data.adjoint())
    }

    /// Kronecker product `self ⊗ others[0] ⊗ …`
    pub fn tensor(&self, others: &[&Operator]) -> Operator {
        let data = others
            .iter()
            .fold(self.data.clone(), |acc, next| kron_matrix(&acc, &next.data));
        Operator::new(data)
    }

    pub fn trace(&self) -> Result<Complex64> {
        self.require_square()?;
        Ok(self.data.trace())
    }

    /// (A + A†) / 2
    pub fn hermitian_part(&self) -> Operator {
        Operator::new((&self.data + self.data.adjoint()) * Complex64::new(0.5, 0.0))
    }

    pub fn is_hermitian(&self) -> bool {
        self.is_hermitian_within(PREDICATE_TOLERANCE)
    }

    /// A = A† entrywise within `tolerance`
    pub fn is_hermitian_within(&self, tolerance: f64) -> bool {
        self.is_square() && matrices_close(&self.data, &self.data.adjoint(), tolerance)
    }

    pub fn is_antihermitian(&self) -> bool {
        self.is_square() && matrices_close(&self.data, &-self.data.adjoint(), PREDICATE_TOLERANCE)
    }

    /// A A† = A† A
    pub fn is_normal(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let adjoint = self.data.adjoint();
        matrices_close(&(&self.data * &adjoint), &(&adjoint * &self.data), PREDICATE_TOLERANCE)
    }

    /// U† U = I
    ///
    /// # Errors
    /// Returns `NotSquare` for rectangular operators.
    pub fn is_unitary(&self) -> Result<bool> {
        self.require_square()?;
        let product = self.data.adjoint() * &self.data;
        Ok(matrices_close(
            &product,
            &DMatrix::identity(self.dim(), self.dim()),
            PREDICATE_TOLERANCE,
        ))
    }

    /// [A, B] = AB − BA
    pub fn commutator(&self, other: &Operator) -> Result<Operator> {
        self.matmul(other)?.checked_sub(&other.matmul(self)?)
    }

    /// {A, B} = AB + BA
    pub fn anti_commutator(&self, other: &Operator) -> Result<Operator> {
        self.matmul(other)?.checked_add(&other.matmul(self)?)
    }

    /// Eigenvalues of a Hermitian operator in ascending order
    pub fn eigenvalues_hermitian(&self) -> Result<Vec<f64>> {
        Ok(self
            .spectral_decomposition()?
            .into_iter()
            .map(|(value, _)| value)
            .collect())
    }

    /// Eigenpairs `(λ, |v⟩)` of a Hermitian operator, ascending in λ
    ///
    /// # Errors
    /// `NotSquare` for rectangular input, `NotHermitian` otherwise when A ≠ A†.
    pub fn spectral_decomposition(&self) -> Result<Vec<(f64, Ket)>> {
        self.require_square()?;
        if !self.is_hermitian_within(TOLERANCE) {
            return Err(QuantumError::NotHermitian("spectral decomposition"));
        }

        let eigen = self.hermitian_part().data.symmetric_eigen();
        let mut pairs: Vec<(f64, Ket)> = eigen
            .eigenvalues
            .iter()
            .enumerate()
            .map(|(i, &value)| (value, Ket::from_vector(eigen.eigenvectors.column(i).into_owned())))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(pairs)
    }

    /// Principal square root of a positive semidefinite operator
    ///
    /// Negative eigenvalues from round-off are clamped to zero.
    pub fn sqrt_psd(&self) -> Result<Operator> {
        let dim = self.dim();
        let mut root = DMatrix::<Complex64>::zeros(dim, dim);
        for (value, vector) in self.spectral_decomposition()? {
            let weight = Complex64::new(value.max(0.0).sqrt(), 0.0);
            let v = vector.as_vector();
            root += (v * v.adjoint()) * weight;
        }
        Ok(Operator::new(root))
    }

    /// −Σ λ ln λ over strictly positive eigenvalues
    pub fn von_neumann_entropy(&self) -> Result<f64> {
        Ok(self
            .eigenvalues_hermitian()?
            .into_iter()
            .filter(|&value| value > 0.0)
            .map(|value| -value * value.ln())
            .sum())
    }

    pub fn is_real(&self) -> bool {
        all_real(self.data.iter())
    }

    pub fn approx_eq(&self, other: &Operator, tolerance: f64) -> bool {
        self.data.shape() == other.data.shape() && matrices_close(&self.data, &other.data, tolerance)
    }

    pub(crate) fn require_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(QuantumError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(())
    }

    fn check_same_shape(&self, op: &'static str, other: &Operator) -> Result<()> {
        if self.nrows() != other.nrows() {
            return Err(QuantumError::dimension_mismatch(op, self.nrows(), other.nrows()));
        }
        if self.ncols() != other.ncols() {
            return Err(QuantumError::dimension_mismatch(op, self.ncols(), other.ncols()));
        }
        Ok(())
    }
}

fn matrices_close(a: &DMatrix<Complex64>, b: &DMatrix<Complex64>, tolerance: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= tolerance)
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let real = self.is_real();
        writeln!(f, "Operator({}x{})", self.nrows(), self.ncols())?;
        for r in 0..self.nrows() {
            let row: Vec<String> = (0..self.ncols())
                .map(|c| format_scalar(&self.data[(r, c)], real))
                .collect();
            writeln!(f, "  [{}]", row.join(", "))?;
        }
        Ok(())
    }
}
