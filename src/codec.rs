//! String ↔ coefficient codec.
//!
//! A secret is uppercased, split into consecutive chunks of
//! `max(1, len / chunk_factor)` characters (the last chunk may be shorter),
//! and each chunk is packed into one coefficient, little-endian, with
//! `digits_width` decimal digits per character:
//!
//! ```text
//! "HI", chunk 1   → [72, 73]
//! "WH", chunk 2   → 87 + 72 * 100 = 7287
//! ```
//!
//! Every character code must occupy exactly `digits_width` digits, so only
//! width 2 carries letters; wider codecs hold nothing but higher code points.
//!
//! The coefficient count depends on the secret length, not on the fitting
//! degree. See [`crate::config::VaultConfig::for_secret`].
//!
//! ## Lossy Decode
//!
//! Decode skips coefficients that are zero. Valid characters never pack to
//! zero, so this only drops the zero padding a higher-degree fit produces,
//! but a genuinely zero coefficient would be lost silently.

use thiserror::Error;
use tracing::debug;

/// Largest number of decimal digits a packed coefficient may hold while
/// staying exactly representable as an f64 integer (10^15 < 2^53).
const MAX_PACKED_DIGITS: u32 = 15;

/// Codec errors
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("Secret is empty")]
    EmptySecret,

    #[error("Character {ch:?} (code {code}) does not fit the configured digit width")]
    UnencodableChar { ch: char, code: u32 },

    #[error("Chunk of {chunk_len} characters exceeds the {max} characters a coefficient can hold")]
    ChunkTooWide { chunk_len: usize, max: usize },

    #[error("Coefficient {0} cannot be decoded (negative, non-finite or too large)")]
    InvalidCoefficient(f64),

    #[error("Decoded character code {0} is not a valid character")]
    InvalidCharCode(u64),
}

/// Packs secrets into polynomial coefficients and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringCodec {
    chunk_factor: usize,
    digits_width: u32,
}

impl Default for StringCodec {
    fn default() -> Self {
        Self::new(4, 2)
    }
}

impl StringCodec {
    /// Create a codec. A zero `chunk_factor` is treated as 1.
    pub fn new(chunk_factor: usize, digits_width: u32) -> Self {
        Self {
            chunk_factor: chunk_factor.max(1),
            digits_width,
        }
    }

    fn base(&self) -> u64 {
        10u64.pow(self.digits_width)
    }

    fn max_chunk_len(&self) -> usize {
        (MAX_PACKED_DIGITS / self.digits_width.max(1)) as usize
    }

    /// Characters per chunk for a secret of `len` characters
    fn chunk_len(&self, len: usize) -> usize {
        (len / self.chunk_factor).max(1)
    }

    /// Number of coefficients `secret` encodes to
    pub fn chunk_count(&self, secret: &str) -> usize {
        let len = secret.to_uppercase().chars().count();
        len.div_ceil(self.chunk_len(len))
    }

    /// Encode a secret into coefficients, lowest degree first.
    ///
    /// # Errors
    ///
    /// - `EmptySecret`: nothing to encode
    /// - `UnencodableChar`: a character code is not exactly `digits_width` digits
    /// - `ChunkTooWide`: the secret is too long for exact f64 packing
    pub fn encode(&self, secret: &str) -> Result<Vec<f64>, CodecError> {
        let chars: Vec<char> = secret.to_uppercase().chars().collect();
        if chars.is_empty() {
            return Err(CodecError::EmptySecret);
        }

        let chunk_len = self.chunk_len(chars.len());
        if chunk_len > self.max_chunk_len() {
            return Err(CodecError::ChunkTooWide {
                chunk_len,
                max: self.max_chunk_len(),
            });
        }

        let base = self.base();
        let min_code = base / 10;

        chars
            .chunks(chunk_len)
            .map(|chunk| {
                let mut packed = 0u64;
                let mut place = 1u64;
                for &ch in chunk {
                    let code = ch as u32;
                    if u64::from(code) < min_code || u64::from(code) >= base {
                        return Err(CodecError::UnencodableChar { ch, code });
                    }
                    packed += u64::from(code) * place;
                    place *= base;
                }
                Ok(packed as f64)
            })
            .collect()
    }

    /// Decode coefficients back into a string.
    ///
    /// Each coefficient is rounded to the nearest integer first, so small
    /// regression noise does not shift digits. Zero coefficients are skipped,
    /// and only `digits / digits_width` whole groups are read, so a value
    /// with an odd digit count loses its highest digit.
    pub fn decode(&self, coeffs: &[f64]) -> Result<String, CodecError> {
        let base = self.base();
        let mut secret = String::new();

        for (degree, &c) in coeffs.iter().enumerate() {
            let rounded = c.round();
            if !rounded.is_finite() || rounded < 0.0 || rounded >= 2f64.powi(53) {
                return Err(CodecError::InvalidCoefficient(c));
            }

            let mut value = rounded as u64;
            if value == 0 {
                debug!(degree, "skipping zero coefficient");
                continue;
            }

            // Whole digit groups only: a short leading group is dropped
            let digits = value.ilog10() + 1;
            let groups = digits / self.digits_width;

            for _ in 0..groups {
                let code = value % base;
                let ch = u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(CodecError::InvalidCharCode(code))?;
                secret.push(ch);
                value /= base;
            }
        }

        Ok(secret)
    }
}
