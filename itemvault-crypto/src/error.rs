//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key derivation failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Authentication failed: the tag did not verify under any configured
    /// key. Wrong key material or tampered ciphertext.
    #[error("cryptographic integrity failure (wrong key or tampered data)")]
    Integrity,

    /// The input is structurally too short to contain the
    /// `[salt][iv][ciphertext||tag]` layout. Distinct from an
    /// authentication failure: no key can repair a truncated buffer.
    #[error("malformed ciphertext: {len} bytes, need at least {min}")]
    Malformed { len: usize, min: usize },

    /// The caller-allocated buffer was smaller than requested.
    #[error("allocated buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// Encoding error around the ciphertext (base64, UTF-8).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
