//! Real polynomials as coefficient vectors.
//!
//! Coefficients are stored lowest degree first: `[3, 2, 1]` is `3 + 2x + x^2`.
//!
//! - [`evaluate`]: Horner evaluation
//! - [`fit`]: least-squares regression through a QR decomposition

mod regression;

pub use regression::{fit, FitError};

/// Evaluate the polynomial `coeffs` at `x`.
pub fn evaluate(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Round `value` to the nearest multiple of `unit`.
///
/// Negative zero is normalised to positive zero.
pub(crate) fn round_to_unit(value: f64, unit: f64) -> f64 {
    (value / unit).round() * unit + 0.0
}
