//! Key derivation.
//!
//! Every encryption operation derives a fresh 256-bit key from the cipher's
//! configured secret and a random per-operation salt, using HKDF-SHA256.

use crate::error::{CryptoError, CryptoResult};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of encryption keys in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// Size of the per-operation salt in bytes (128 bits).
pub const SALT_SIZE: usize = 16;

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a new derived key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Salt for key derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt {
    bytes: [u8; SALT_SIZE],
}

impl Salt {
    /// Generates a random salt.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a salt from raw bytes.
    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self { bytes }
    }

    /// Creates a salt from a slice.
    ///
    /// Returns `CryptoError::Malformed` if the slice is not SALT_SIZE bytes.
    pub fn from_slice(slice: &[u8]) -> CryptoResult<Self> {
        if slice.len() != SALT_SIZE {
            return Err(CryptoError::Malformed {
                len: slice.len(),
                min: SALT_SIZE,
            });
        }
        let mut bytes = [0u8; SALT_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    /// Returns the salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.bytes
    }
}

/// Derives an encryption key from a secret and salt using HKDF-SHA256.
///
/// `info` binds the derived key to the cipher's algorithm identity so the
/// same secret used under a different algorithm name yields unrelated keys.
pub fn derive_key(secret: &[u8], salt: &Salt, info: &[u8]) -> CryptoResult<DerivedKey> {
    let hkdf = Hkdf::<Sha256>::new(Some(salt.as_bytes()), secret);
    let mut key_bytes = [0u8; KEY_SIZE];
    hkdf.expand(info, &mut key_bytes)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(DerivedKey::from_bytes(key_bytes))
}
