//! KeyChain - Fuzzy Vault
//!
//! Binds a secret string to a noisy, unordered set of real-valued feature
//! points (a "template") so that only a sufficiently similar template can
//! reconstruct the secret.
//!
//! Data flow:
//! - `secret, template → VaultLocker → Vault`
//! - `template, Vault → VaultUnlocker → coefficients → StringCodec::decode → secret`
//!
//! Key properties:
//! - Genuine points are hidden among uniformly drawn chaff points
//! - The vault carries no marker distinguishing genuine from chaff
//! - Randomness is always an explicit, seedable dependency
//! - Locker and unlocker share one `VaultConfig` (degree is never implicit)
//!
//! Known limitation: genuine x-coordinates are the template values
//! themselves, so anyone holding the template can isolate the genuine points.

pub mod codec;
pub mod config;
pub mod logging;
pub mod polynomial;
pub mod serialization;
pub mod template;
pub mod vault;

pub use codec::{CodecError, StringCodec};
pub use config::{ConfigError, KeychainConfig, LoggingConfig, VaultConfig};
pub use polynomial::{evaluate, fit, FitError};
pub use vault::{ChaffGenerator, Vault, VaultError, VaultLocker, VaultPoint, VaultUnlocker};
