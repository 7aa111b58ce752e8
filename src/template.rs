//! Feature templates.
//!
//! A template is an already-reduced sequence of real-valued feature points
//! (a stand-in for biometric minutiae). Order carries no meaning, but the
//! same values must be presented at lock and unlock time, and no two values
//! should lie within the matching tolerance of each other.

use rand::Rng;

use crate::vault::VaultError;

/// Generate `n` random template values uniformly in `[0, 10^digits_width)`.
///
/// Demo and test stand-in for a feature extractor.
pub fn generate_random_template<R: Rng + ?Sized>(n: usize, digits_width: u32, rng: &mut R) -> Vec<f64> {
    let upper = 10f64.powi(digits_width as i32);
    (0..n).map(|_| rng.gen::<f64>() * upper).collect()
}

/// Check that a template is non-empty and all values are finite.
pub fn validate_template(template: &[f64]) -> Result<(), VaultError> {
    if template.is_empty() {
        return Err(VaultError::EmptyTemplate);
    }
    if let Some((index, &value)) = template.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(VaultError::InvalidTemplate { index, value });
    }
    Ok(())
}
