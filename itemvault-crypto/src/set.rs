//! Rotation-aware cipher sets.
//!
//! A `CipherSet` holds exactly one primary cipher and zero or more
//! secondary ciphers. All new ciphertext is written under the primary;
//! secondaries exist only to decrypt data written under retired keys.
//! Rotating a key means promoting a new primary and appending the old one
//! to the secondary list — no re-encryption pass is required.

use crate::cipher::BlockCipher;
use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// One primary cipher plus retired secondaries kept for decryption.
#[derive(Debug)]
pub struct CipherSet {
    primary: BlockCipher,
    secondaries: Vec<BlockCipher>,
}

impl CipherSet {
    /// Creates a set with only a primary cipher.
    pub fn new(primary: BlockCipher) -> Self {
        Self {
            primary,
            secondaries: Vec::new(),
        }
    }

    /// Creates a set with a primary and retired secondaries, in the order
    /// they should be tried during decryption.
    pub fn with_secondaries(primary: BlockCipher, secondaries: Vec<BlockCipher>) -> Self {
        Self {
            primary,
            secondaries,
        }
    }

    /// The cipher used for all new encryption.
    pub fn primary(&self) -> &BlockCipher {
        &self.primary
    }

    /// The retired ciphers, in registration order.
    pub fn secondaries(&self) -> &[BlockCipher] {
        &self.secondaries
    }

    /// Encrypts with the primary cipher into a caller-allocated buffer.
    pub fn encrypt_with<B: AsMut<[u8]>>(
        &self,
        plaintext: &[u8],
        allocate: impl FnOnce(usize) -> B,
    ) -> CryptoResult<B> {
        self.primary.encrypt_with(plaintext, allocate)
    }

    /// Encrypts with the primary cipher into a fresh Vec.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.primary.encrypt(plaintext)
    }

    /// Decrypts with the first cipher that authenticates: the primary
    /// first, then each secondary in registration order.
    ///
    /// Only `Integrity` failures fall through to the next cipher. A
    /// structural `Malformed` error aborts immediately since no key can
    /// repair a truncated buffer. Fails with `Integrity` when every cipher
    /// in the set fails.
    pub fn decrypt(&self, input: &[u8], offset: usize) -> CryptoResult<Vec<u8>> {
        for cipher in std::iter::once(&self.primary).chain(self.secondaries.iter()) {
            match cipher.decrypt_with(input, offset, |size| vec![0u8; size]) {
                Ok(plaintext) => return Ok(plaintext),
                Err(CryptoError::Integrity) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(CryptoError::Integrity)
    }

    /// Encrypts a JSON value into its stored text form.
    ///
    /// The value is serialized to its plain JSON encoding, encrypted under
    /// the primary cipher, and base64-encoded. Works for any value type —
    /// the cipher sees only the encoded bytes.
    pub fn encrypt_value(&self, value: &serde_json::Value) -> CryptoResult<String> {
        let plain = serde_json::to_vec(value)?;
        let sealed = self.encrypt(&plain)?;
        Ok(STANDARD.encode(sealed))
    }

    /// Reverses `encrypt_value`: base64-decode, decrypt with key fallback,
    /// parse the plain JSON encoding back to a value.
    pub fn decrypt_value(&self, encoded: &str) -> CryptoResult<serde_json::Value> {
        let sealed = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::Encoding(format!("invalid base64: {e}")))?;
        let plain = self.decrypt(&sealed, 0)?;
        Ok(serde_json::from_slice(&plain)?)
    }
}
