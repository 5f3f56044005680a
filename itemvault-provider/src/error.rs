//! Error taxonomy for the command/provider core.
//!
//! Configuration errors are fatal and surface at registration or call time.
//! Validation, conflict, and not-found errors are recoverable by the
//! caller; the core never retries anything on its own. Cryptographic
//! integrity failures surface through the `Crypto` variant as hard
//! failures distinct from application-level errors.

use itemvault_crypto::CryptoError;
use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by providers and commands.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Invalid registration or a disallowed operation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The supplied validator rejected the current state. No write occurred.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The version stamp the command was read with no longer matches the
    /// stored one. No write occurred; re-read and retry if desired.
    #[error("version conflict on {id}/{partition_key}")]
    Conflict { id: String, partition_key: String },

    /// The update/delete target is missing.
    #[error("item not found: {id}/{partition_key}")]
    NotFound { id: String, partition_key: String },

    /// The command was already saved, failed, or disposed.
    #[error("command already consumed")]
    CommandConsumed,

    /// Cryptographic failure, including integrity failures across the
    /// whole cipher set (data corruption or missing key material).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Adapter-level failure.
    #[error("store error: {0}")]
    Store(String),
}

/// Errors the backing-store adapter primitive can raise.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The conditional write's expected stamp did not match (or an insert
    /// target already exists).
    #[error("version conflict")]
    Conflict,

    /// The conditional write's target row is missing.
    #[error("not found")]
    NotFound,

    /// A persisted record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// The store cannot be reached or is unhealthy.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Maps a store failure onto the caller-facing taxonomy for the item
    /// the operation addressed.
    pub(crate) fn from_store(err: StoreError, id: &str, partition_key: &str) -> Self {
        match err {
            StoreError::Conflict => ProviderError::Conflict {
                id: id.to_string(),
                partition_key: partition_key.to_string(),
            },
            StoreError::NotFound => ProviderError::NotFound {
                id: id.to_string(),
                partition_key: partition_key.to_string(),
            },
            other => ProviderError::Store(other.to_string()),
        }
    }
}
