//! Vault interchange formats.
//!
//! A vault is published as a bare sequence of `[x, y]` pairs:
//! - JSON via `serde_json` (the textual form, e.g. for embedding in records)
//! - CBOR via `ciborium` (compact binary form)
//!
//! Both round-trip finite f64 values exactly. Compression, splitting and
//! transport are left to the caller: they must treat the output as opaque.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Decoding failed.
    #[error("Decoding failed: {0}")]
    Decode(String),
}

/// Serialize to a compact JSON string.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    serde_json::to_string(value).map_err(|e| SerializationError::Encode(e.to_string()))
}

/// Deserialize from JSON text.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, SerializationError> {
    serde_json::from_str(text).map_err(|e| SerializationError::Decode(e.to_string()))
}

/// Encode as CBOR: an array of two-element float arrays for a vault.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut encoded = Vec::new();
    ciborium::into_writer(value, &mut encoded)
        .map_err(|e| SerializationError::Encode(e.to_string()))?;
    Ok(encoded)
}

/// Decode CBOR produced by [`to_cbor`] (or any CBOR of the same shape).
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    ciborium::from_reader(bytes).map_err(|e| SerializationError::Decode(e.to_string()))
}
