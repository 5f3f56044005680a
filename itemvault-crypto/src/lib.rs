//! Field-level encryption layer for ItemVault.
//!
//! Implements the block cipher engine behind encrypted item fields:
//! AES-256-GCM with a per-operation HKDF-SHA256 key derived from the
//! configured secret and a fresh random salt, persisted as the bit-exact
//! layout `[16-byte salt][12-byte iv][ciphertext || 16-byte tag]`.
//!
//! `CipherSet` layers key rotation on top: one primary cipher for all new
//! writes plus retired secondaries that keep previously-written ciphertext
//! readable.
//!
//! The engine holds no mutable state beyond the configured keys, so
//! concurrent encrypt/decrypt calls need no synchronization.

mod cipher;
mod error;
mod key;
mod set;

pub use cipher::{BlockCipher, HEADER_SIZE, IV_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, Salt, KEY_SIZE, SALT_SIZE};
pub use set::CipherSet;
