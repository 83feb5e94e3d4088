//! Dense linear-algebra primitives
//!
//! - [`Ket`]: column state vector
//! - [`Bra`]: its conjugate-transpose covector
//! - [`Operator`]: square complex matrix acting on kets
//!
//! Tensor products follow the usual Kronecker convention: the receiver occupies
//! the most-significant block, so `a.tensor(&[&b])` indexes as `i_a * dim_b + i_b`.

mod bra;
mod ket;
mod operator;
mod partial_trace;

pub use bra::Bra;
pub use ket::Ket;
pub use operator::Operator;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

/// Absolute tolerance under which a value is treated as numerically zero
///
/// Used for the "imaginary part vanishes" check and by the advisory operator
/// predicates.
pub const TOLERANCE: f64 = 1e-8;

/// Returns true when every imaginary part is within [`TOLERANCE`] of zero
pub(crate) fn all_real<'a>(values: impl IntoIterator<Item = &'a Complex64>) -> bool {
    values.into_iter().all(|z| z.im.abs() <= TOLERANCE)
}

/// Kronecker product of two column vectors
pub(crate) fn kron_vector(a: &DVector<Complex64>, b: &DVector<Complex64>) -> DVector<Complex64> {
    let n_b = b.len();
    DVector::from_fn(a.len() * n_b, |i, _| a[i / n_b] * b[i % n_b])
}

/// Kronecker product of two matrices
pub(crate) fn kron_matrix(a: &DMatrix<Complex64>, b: &DMatrix<Complex64>) -> DMatrix<Complex64> {
    let (rows_b, cols_b) = b.shape();
    DMatrix::from_fn(a.nrows() * rows_b, a.ncols() * cols_b, |r, c| {
        a[(r / rows_b, c / cols_b)] * b[(r % rows_b, c % cols_b)]
    })
}

/// Formats a complex scalar, dropping a numerically-zero imaginary part
pub(crate) fn format_scalar(z: &Complex64, real: bool) -> String {
    if real {
        format!("{:.6}", z.re)
    } else {
        format!("{:.6}{:+.6}i", z.re, z.im)
    }
}
