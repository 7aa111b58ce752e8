//! Fuzzy vault construction and reconstruction.
//!
//! ## Lifecycle
//!
//! 1. **Lock**: the secret is encoded as polynomial coefficients, the polynomial
//!    is evaluated at every template value (genuine points), chaff points are
//!    added and the whole set is shuffled
//! 2. **Transport**: the vault is an opaque list of `(x, y)` pairs; see
//!    [`crate::serialization`]
//! 3. **Unlock**: template values are matched against vault x-coordinates and
//!    the polynomial is regressed from the matches
//!
//! There are no intermediate states: lock and unlock are pure transforms of
//! their inputs plus the injected random source.
//!
//! ## Security Properties
//!
//! - Genuine and chaff points are indistinguishable by structure
//! - Chaff is drawn from a box 10% larger than the genuine data's range
//! - Genuine x-coordinates ARE the template values; whoever knows or guesses
//!   the template isolates the genuine points

pub mod chaff;
pub mod lock;
pub mod unlock;

#[cfg(test)]
mod proptests;

pub use chaff::ChaffGenerator;
pub use lock::VaultLocker;
pub use unlock::VaultUnlocker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::CodecError;
use crate::polynomial::FitError;

/// Errors from locking or unlocking a vault
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Template is empty")]
    EmptyTemplate,

    #[error("Template value at index {index} is not finite: {value}")]
    InvalidTemplate { index: usize, value: f64 },

    #[error("Polynomial value at template index {index} (x = {x}) is not finite")]
    NonFiniteEvaluation { index: usize, x: f64 },

    #[error("Secret encodes to {coefficients} coefficients but degree {degree} fits at most {}", .degree + 1)]
    DegreeMismatch { coefficients: usize, degree: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Regression failed: {0}")]
    Regression(#[from] FitError),
}

/// A single `(x, y)` vault coordinate.
///
/// Serialized as a bare two-element sequence `[x, y]`. Whether a point is
/// genuine or chaff is not recorded anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct VaultPoint {
    pub x: f64,
    pub y: f64,
}

impl VaultPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for VaultPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<VaultPoint> for (f64, f64) {
    fn from(point: VaultPoint) -> Self {
        (point.x, point.y)
    }
}

/// The published vault: genuine points shuffled among chaff.
///
/// Immutable once built. Serializes as a plain sequence of `[x, y]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault {
    points: Vec<VaultPoint>,
}

impl Vault {
    /// All points, in published (shuffled) order
    pub fn points(&self) -> &[VaultPoint] {
        &self.points
    }

    /// Number of points (template size + chaff count)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaultPoint> {
        self.points.iter()
    }

    /// First point whose x-coordinate lies within `epsilon` of `x`
    pub fn find_x(&self, x: f64, epsilon: f64) -> Option<&VaultPoint> {
        self.points.iter().find(|p| (p.x - x).abs() < epsilon)
    }

    pub fn into_points(self) -> Vec<VaultPoint> {
        self.points
    }
}

impl From<Vec<VaultPoint>> for Vault {
    fn from(points: Vec<VaultPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<VaultPoint> for Vault {
    fn from_iter<I: IntoIterator<Item = VaultPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
