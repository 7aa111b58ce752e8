//! Vault locking.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::{ChaffGenerator, Vault, VaultError, VaultPoint};
use crate::codec::StringCodec;
use crate::config::VaultConfig;
use crate::polynomial::evaluate;
use crate::template::validate_template;

/// Builds vaults from a secret and a template.
#[derive(Debug, Clone)]
pub struct VaultLocker {
    config: VaultConfig,
    codec: StringCodec,
    chaff: ChaffGenerator,
}

impl VaultLocker {
    /// Create a locker. The matching [`super::VaultUnlocker`] must use the same config.
    pub fn new(config: VaultConfig) -> Self {
        Self {
            codec: config.codec(),
            chaff: ChaffGenerator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Lock `secret` under `template`.
    ///
    /// # Flow
    ///
    /// 1. Encode the secret into coefficients
    /// 2. Evaluate the polynomial at each template value (genuine points)
    /// 3. Generate `r_high - t_low` chaff points inside the inflated bounding box
    /// 4. Shuffle genuine and chaff points together (Fisher-Yates)
    ///
    /// The vault holds `template.len() + chaff_count` points. A template with
    /// fewer than `degree + 1` values locks fine but can never be unlocked.
    ///
    /// # Errors
    ///
    /// - `EmptyTemplate` / `InvalidTemplate`: no values, or a non-finite value
    /// - `Codec`: the secret cannot be packed
    /// - `DegreeMismatch`: the secret needs more coefficients than the configured degree fits
    /// - `NonFiniteEvaluation`: a template value overflows the polynomial, which
    ///   would leave non-finite points (and chaff bounds) in the vault
    pub fn lock<R: Rng + ?Sized>(
        &self,
        secret: &str,
        template: &[f64],
        rng: &mut R,
    ) -> Result<Vault, VaultError> {
        validate_template(template)?;

        let coeffs = self.codec.encode(secret)?;
        if coeffs.len() > self.config.coefficient_count() {
            return Err(VaultError::DegreeMismatch {
                coefficients: coeffs.len(),
                degree: self.config.degree,
            });
        }

        if template.len() < self.config.coefficient_count() {
            warn!(
                template = template.len(),
                required = self.config.coefficient_count(),
                "template too small to ever unlock this vault"
            );
        }

        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut points = Vec::with_capacity(template.len() + self.chaff.count());
        for (index, &x) in template.iter().enumerate() {
            let y = evaluate(x, &coeffs);
            if !y.is_finite() {
                return Err(VaultError::NonFiniteEvaluation { index, x });
            }
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            points.push(VaultPoint::new(x, y));
        }

        points.extend(self.chaff.generate(max_x, max_y, rng));
        points.shuffle(rng);

        debug!(
            coefficients = coeffs.len(),
            genuine = template.len(),
            chaff = self.chaff.count(),
            "vault locked"
        );

        Ok(Vault::from(points))
    }
}
