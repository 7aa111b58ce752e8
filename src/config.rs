//! KeyChain configuration handling
//!
//! Configuration files are TOML. Every field has a default, so an empty file
//! (or a missing `[vault]` table) yields the reference parameters.
//!
//! ## Shared Parameters
//!
//! The locker and the unlocker MUST be built from the same `VaultConfig`.
//! In particular `degree` is a shared, out-of-band parameter: the vault itself
//! does not record it. Publish it alongside the vault, or derive it from the
//! secret with [`VaultConfig::for_secret`] when the secret length is known.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codec::StringCodec;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Largest digit width whose packed characters stay below 2^53.
const MAX_DIGITS_WIDTH: u32 = 7;

/// Lowest and highest letters a usable digit width must hold
const LETTER_BOUNDS: &str = "AZ";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fuzzy vault parameters.
///
/// Defaults reproduce the reference scheme: degree 4 polynomial, secret split
/// into chunks of `len / 4` characters, two decimal digits per character,
/// 30 chaff points, 1e-3 matching tolerance, coefficients rounded to 0.01.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Degree of the polynomial fitted at unlock time
    pub degree: usize,

    /// Chunk factor: the secret is split into chunks of `max(1, len / chunk_factor)` characters
    pub chunk_factor: usize,

    /// Decimal digits per packed character
    pub digits_width: u32,

    /// Lower chaff threshold
    pub t_low: usize,

    /// Upper chaff threshold (chaff count = `r_high - t_low`)
    pub r_high: usize,

    /// Maximum distance between a template value and a vault x-coordinate to count as a match
    pub match_epsilon: f64,

    /// Fitted coefficients are rounded to a multiple of this unit
    pub rounding_unit: f64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            degree: 4,
            chunk_factor: 4,
            digits_width: 2,
            t_low: 10,
            r_high: 40,
            match_epsilon: 1e-3,
            rounding_unit: 0.01,
        }
    }
}

impl VaultConfig {
    /// Number of chaff points added to every vault
    pub fn chaff_count(&self) -> usize {
        self.r_high.saturating_sub(self.t_low)
    }

    /// Number of coefficients the unlocker fits (`degree + 1`)
    pub fn coefficient_count(&self) -> usize {
        self.degree + 1
    }

    /// Codec configured with this config's chunk factor and digit width
    pub fn codec(&self) -> StringCodec {
        StringCodec::new(self.chunk_factor, self.digits_width)
    }

    /// Default parameters with `degree` set to match the coefficient count
    /// `secret` encodes to.
    ///
    /// Returns the default config unchanged when the secret encodes to
    /// nothing (empty secret); lock will reject it anyway.
    pub fn for_secret(secret: &str) -> Self {
        Self::default().with_degree_for(secret)
    }

    /// This config with `degree` derived from the chunk count of `secret`
    pub fn with_degree_for(mut self, secret: &str) -> Self {
        let chunks = self.codec().chunk_count(secret);
        if chunks > 0 {
            self.degree = chunks - 1;
        }
        self
    }

    /// Check parameter consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.r_high < self.t_low {
            return Err(ConfigError::Invalid(format!(
                "r_high ({}) must not be below t_low ({})",
                self.r_high, self.t_low
            )));
        }
        if self.chunk_factor == 0 {
            return Err(ConfigError::Invalid("chunk_factor must be at least 1".to_string()));
        }
        if !(1..=MAX_DIGITS_WIDTH).contains(&self.digits_width) {
            return Err(ConfigError::Invalid(format!(
                "digits_width must be between 1 and {}",
                MAX_DIGITS_WIDTH
            )));
        }
        // Every character code must occupy exactly `digits_width` digits;
        // only width 2 holds the letters A-Z (codes 65..=90)
        if StringCodec::new(1, self.digits_width).encode(LETTER_BOUNDS).is_err() {
            return Err(ConfigError::Invalid(format!(
                "digits_width {} cannot encode the letters A-Z",
                self.digits_width
            )));
        }
        if !(self.match_epsilon.is_finite() && self.match_epsilon > 0.0) {
            return Err(ConfigError::Invalid("match_epsilon must be positive".to_string()));
        }
        if !(self.rounding_unit.is_finite() && self.rounding_unit > 0.0) {
            return Err(ConfigError::Invalid("rounding_unit must be positive".to_string()));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error, `keychain=debug`)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeychainConfig {
    /// Vault parameters shared by locker and unlocker
    #[serde(default)]
    pub vault: VaultConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KeychainConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: KeychainConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.vault.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
