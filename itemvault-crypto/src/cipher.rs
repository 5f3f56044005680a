//! Block cipher using AES-256-GCM.
//!
//! Every operation derives its key from the cipher's configured secret and
//! a fresh random salt, then writes the bit-exact persisted layout
//! `[16-byte salt][12-byte iv][ciphertext || 16-byte tag]`.
//!
//! Output goes into a caller-allocated buffer: callers hand over an
//! `allocate(size)` callback so ciphertext can land directly inside a
//! larger pre-sized buffer (e.g. a serialization stream) with no
//! intermediate copy.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, Salt, SALT_SIZE};
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Size of the IV in bytes (96 bits for GCM).
pub const IV_SIZE: usize = 12;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Bytes of layout preceding the ciphertext: salt then IV.
pub const HEADER_SIZE: usize = SALT_SIZE + IV_SIZE;

/// A named symmetric key configuration.
///
/// The cipher holds the secret material; per-operation keys are derived
/// from it and never leave this module. `id` identifies the configuration
/// deterministically (for distinguishing configured keys) and is never
/// transmitted or embedded in ciphertext.
pub struct BlockCipher {
    name: String,
    secret: Zeroizing<Vec<u8>>,
    id: u32,
}

impl BlockCipher {
    /// Creates a cipher from an algorithm name and secret material.
    pub fn new(name: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let secret = Zeroizing::new(secret.into());
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(secret.as_slice());
        let digest = hasher.finalize();
        let id = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        Self { name, secret, id }
    }

    /// Deterministic identifier derived from the algorithm identity and
    /// secret material.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The configured algorithm name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encrypts `plaintext` into a buffer obtained from `allocate`.
    ///
    /// `allocate` is called once with the exact output size
    /// (`HEADER_SIZE + plaintext.len() + TAG_SIZE`) and must return a
    /// buffer at least that large. The layout written is
    /// `[salt][iv][ciphertext || tag]`.
    pub fn encrypt_with<B: AsMut<[u8]>>(
        &self,
        plaintext: &[u8],
        allocate: impl FnOnce(usize) -> B,
    ) -> CryptoResult<B> {
        let salt = Salt::random();
        let mut iv = [0u8; IV_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut iv);

        let key = derive_key(&self.secret, &salt, self.name.as_bytes())?;
        let cipher = Aes256Gcm::new(key.as_bytes().into());

        let total = HEADER_SIZE + plaintext.len() + TAG_SIZE;
        let mut buffer = allocate(total);
        {
            let out = buffer.as_mut();
            if out.len() < total {
                return Err(CryptoError::BufferTooSmall {
                    needed: total,
                    got: out.len(),
                });
            }
            let out = &mut out[..total];
            out[..SALT_SIZE].copy_from_slice(salt.as_bytes());
            out[SALT_SIZE..HEADER_SIZE].copy_from_slice(&iv);
            out[HEADER_SIZE..HEADER_SIZE + plaintext.len()].copy_from_slice(plaintext);

            let nonce = Nonce::from_slice(&iv);
            let tag = cipher
                .encrypt_in_place_detached(
                    nonce,
                    b"",
                    &mut out[HEADER_SIZE..HEADER_SIZE + plaintext.len()],
                )
                .map_err(|e| CryptoError::Encryption(e.to_string()))?;
            out[HEADER_SIZE + plaintext.len()..].copy_from_slice(&tag);
        }
        Ok(buffer)
    }

    /// Decrypts the `[salt][iv][ciphertext || tag]` layout starting at
    /// `offset` in `input`, writing plaintext into a buffer obtained from
    /// `allocate`.
    ///
    /// Input shorter than `HEADER_SIZE + TAG_SIZE` past the offset is a
    /// structural `Malformed` error; a tag mismatch is `Integrity`. No
    /// partial plaintext is ever returned; on authentication failure the
    /// allocated buffer is zeroed.
    pub fn decrypt_with<B: AsMut<[u8]>>(
        &self,
        input: &[u8],
        offset: usize,
        allocate: impl FnOnce(usize) -> B,
    ) -> CryptoResult<B> {
        let body = input.get(offset..).unwrap_or(&[]);
        if body.len() < HEADER_SIZE + TAG_SIZE {
            return Err(CryptoError::Malformed {
                len: body.len(),
                min: HEADER_SIZE + TAG_SIZE,
            });
        }
        let salt = Salt::from_slice(&body[..SALT_SIZE])?;
        let iv = &body[SALT_SIZE..HEADER_SIZE];
        let (ciphertext, tag) = body[HEADER_SIZE..].split_at(body.len() - HEADER_SIZE - TAG_SIZE);

        let key = derive_key(&self.secret, &salt, self.name.as_bytes())?;
        let cipher = Aes256Gcm::new(key.as_bytes().into());

        let mut buffer = allocate(ciphertext.len());
        {
            let out = buffer.as_mut();
            if out.len() < ciphertext.len() {
                return Err(CryptoError::BufferTooSmall {
                    needed: ciphertext.len(),
                    got: out.len(),
                });
            }
            let out = &mut out[..ciphertext.len()];
            out.copy_from_slice(ciphertext);

            let nonce = Nonce::from_slice(iv);
            if cipher
                .decrypt_in_place_detached(nonce, b"", out, Tag::from_slice(tag))
                .is_err()
            {
                out.fill(0);
                return Err(CryptoError::Integrity);
            }
        }
        Ok(buffer)
    }

    /// Encrypts `plaintext` into a fresh Vec.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.encrypt_with(plaintext, |size| vec![0u8; size])
    }

    /// Decrypts a full `[salt][iv][ciphertext || tag]` buffer into a fresh Vec.
    pub fn decrypt(&self, input: &[u8]) -> CryptoResult<Vec<u8>> {
        self.decrypt_with(input, 0, |size| vec![0u8; size])
    }
}

impl std::fmt::Debug for BlockCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockCipher")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
