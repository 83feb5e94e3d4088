//! 2×2 gate matrices
//!
//! Constant matrices for the fixed gates and constructors for the
//! parameterized ones. Full-system embeddings live in [`crate::standard`].

use num_complex::Complex64;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X gate matrix (NOT gate)
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

pub const IDENTITY: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ONE]];

/// |0⟩⟨0|
pub const PROJECTOR_ZERO: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, ZERO]];

/// |1⟩⟨1|
pub const PROJECTOR_ONE: [[Complex64; 2]; 2] = [[ZERO, ZERO], [ZERO, ONE]];

/// Phase gate P(θ) = diag(1, e^{iθ})
pub fn phase(theta: f64) -> [[Complex64; 2]; 2] {
    [[ONE, ZERO], [ZERO, Complex64::new(theta.cos(), theta.sin())]]
}

/// RX(θ) = [[cos(θ/2), -i sin(θ/2)], [-i sin(θ/2), cos(θ/2)]]
pub fn rotation_x(theta: f64) -> [[Complex64; 2]; 2] {
    let half_theta = theta / 2.0;
    let cos_val = half_theta.cos();
    let sin_val = half_theta.sin();

    [
        [Complex64::new(cos_val, 0.0), Complex64::new(0.0, -sin_val)],
        [Complex64::new(0.0, -sin_val), Complex64::new(cos_val, 0.0)],
    ]
}

/// RY(θ) = [[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]
pub fn rotation_y(theta: f64) -> [[Complex64; 2]; 2] {
    let half_theta = theta / 2.0;
    let cos_val = half_theta.cos();
    let sin_val = half_theta.sin();

    [
        [Complex64::new(cos_val, 0.0), Complex64::new(-sin_val, 0.0)],
        [Complex64::new(sin_val, 0.0), Complex64::new(cos_val, 0.0)],
    ]
}

/// RZ(θ) = diag(e^{-iθ/2}, e^{iθ/2})
pub fn rotation_z(theta: f64) -> [[Complex64; 2]; 2] {
    let half_theta = theta / 2.0;
    [
        [Complex64::from_polar(1.0, -half_theta), ZERO],
        [ZERO, Complex64::from_polar(1.0, half_theta)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_x_pi_is_minus_i_x() {
        let m = rotation_x(PI);
        assert_relative_eq!(m[0][0].norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(m[0][1].im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(m[1][0].im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_y_half_pi() {
        let m = rotation_y(PI / 2.0);
        assert_relative_eq!(m[0][0].re, INV_SQRT2, epsilon = 1e-12);
        assert_relative_eq!(m[0][1].re, -INV_SQRT2, epsilon = 1e-12);
        assert_relative_eq!(m[1][0].re, INV_SQRT2, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_z_phases() {
        let m = rotation_z(PI);
        assert_relative_eq!(m[0][0].im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(m[1][1].im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_quarter_turn_is_s() {
        let m = phase(PI / 2.0);
        assert_relative_eq!(m[1][1].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(m[1][1].im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projectors_sum_to_identity() {
        for r in 0..2 {
            for c in 0..2 {
                assert_eq!(PROJECTOR_ZERO[r][c] + PROJECTOR_ONE[r][c], IDENTITY[r][c]);
            }
        }
    }
}
