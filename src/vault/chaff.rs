//! Chaff point generation.
//!
//! Chaff coordinates are drawn uniformly from `[0, 1.1 * max_x) × [0, 1.1 * max_y)`.
//! Inflating the box keeps chaff at the same magnitude as the genuine points
//! without publishing the true maxima.

use rand::Rng;

use super::VaultPoint;
use crate::config::VaultConfig;

/// Bounding box inflation applied to the genuine maxima
pub const CHAFF_INFLATION: f64 = 1.1;

/// Produces decoy points bounded by the genuine data's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaffGenerator {
    count: usize,
}

impl ChaffGenerator {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Generator producing `r_high - t_low` points
    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.chaff_count())
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Generate chaff points, x and y sampled independently per point.
    pub fn generate<R: Rng + ?Sized>(&self, max_x: f64, max_y: f64, rng: &mut R) -> Vec<VaultPoint> {
        let x_bound = max_x * CHAFF_INFLATION;
        let y_bound = max_y * CHAFF_INFLATION;

        (0..self.count)
            .map(|_| {
                let x = rng.gen::<f64>() * x_bound;
                let y = rng.gen::<f64>() * y_bound;
                VaultPoint::new(x, y)
            })
            .collect()
    }
}
