//! Vault unlocking.

use tracing::{debug, warn};

use super::{Vault, VaultError};
use crate::codec::StringCodec;
use crate::config::VaultConfig;
use crate::polynomial::fit;

/// Recovers the locked polynomial from a candidate template.
#[derive(Debug, Clone)]
pub struct VaultUnlocker {
    config: VaultConfig,
    codec: StringCodec,
}

impl VaultUnlocker {
    /// Create an unlocker. Must use the config the vault was locked with.
    pub fn new(config: VaultConfig) -> Self {
        Self {
            codec: config.codec(),
            config,
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Match template values against vault x-coordinates.
    ///
    /// For each template value the first vault point within `match_epsilon`
    /// is taken and its y paired with the template value itself, so template
    /// noise reaches the regression. Values with no such point are dropped.
    pub fn match_points(&self, template: &[f64], vault: &Vault) -> Vec<(f64, f64)> {
        template
            .iter()
            .filter_map(|&x| {
                vault
                    .find_x(x, self.config.match_epsilon)
                    .map(|point| (x, point.y))
            })
            .collect()
    }

    /// Recover the `degree + 1` polynomial coefficients.
    ///
    /// # Errors
    ///
    /// - `Regression`: too few matches, or the matches do not determine the polynomial
    pub fn unlock(&self, template: &[f64], vault: &Vault) -> Result<Vec<f64>, VaultError> {
        let matches = self.match_points(template, vault);
        debug!(
            template = template.len(),
            matched = matches.len(),
            "matched template against vault"
        );

        if matches.len() < self.config.coefficient_count() {
            warn!(
                matched = matches.len(),
                required = self.config.coefficient_count(),
                "not enough template values matched the vault"
            );
        }

        let coeffs = fit(&matches, self.config.degree, self.config.rounding_unit)?;
        Ok(coeffs)
    }

    /// Recover coefficients and decode them into the secret (uppercased).
    pub fn unlock_secret(&self, template: &[f64], vault: &Vault) -> Result<String, VaultError> {
        let coeffs = self.unlock(template, vault)?;
        Ok(self.codec.decode(&coeffs)?)
    }
}
