//! Core type definitions for ItemVault.
//!
//! This crate defines the fundamental, store-agnostic types used throughout
//! the persistence core:
//! - `Item` — the persisted entity base shape (identity, version stamp,
//!   timestamps, soft-delete marker, JSON payload)
//! - `VersionStamp` — the opaque optimistic-concurrency token
//! - `TypeName` — the validated per-type discriminator
//! - `ItemEvent` / `PropertyChange` — the append-only audit record shape
//!
//! All domain-specific payload structure belongs to the applications that
//! register item shapes, not here.

mod event;
mod item;
mod name;
mod version;

pub use event::{EventId, ItemEvent, PropertyChange, SaveAction};
pub use item::{now_millis, Item};
pub use name::TypeName;
pub use version::VersionStamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid type name {name:?}: {reason}")]
    InvalidTypeName { name: String, reason: String },

    #[error("type name {0:?} is reserved")]
    ReservedTypeName(String),

    #[error("version conflict: expected {expected:?}, found {actual:?}")]
    VersionConflict { expected: String, actual: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
