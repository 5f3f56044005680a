//! The backing-store adapter primitive.
//!
//! Each concrete store (document, relational, in-memory) implements this
//! trait; the core never branches on store type. The conditional writes
//! must be atomic: exactly one concurrent write for a given expected stamp
//! can succeed, and a mismatch must leave the stored state untouched.

use crate::error::StoreError;
use async_trait::async_trait;
use itemvault_types::{Item, ItemEvent, VersionStamp};

/// Minimal contract a backing-store adapter must satisfy.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Reads one item by identity. Soft-deleted items read as absent.
    async fn read(
        &self,
        type_name: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Option<Item>, StoreError>;

    /// Inserts a new item, failing with `Conflict` if the identity already
    /// exists. The store issues and returns the item's first stamp.
    async fn insert(&self, item: Item) -> Result<VersionStamp, StoreError>;

    /// Replaces an item atomically gated on `expected` matching the stored
    /// stamp. Returns the new stamp on success.
    async fn replace(&self, item: Item, expected: &VersionStamp)
        -> Result<VersionStamp, StoreError>;

    /// Persists the soft-deleted form of an item, atomically gated on
    /// `expected`. Returns the new stamp on success.
    async fn delete(&self, item: Item, expected: &VersionStamp)
        -> Result<VersionStamp, StoreError>;

    /// Appends one audit event. Events are never mutated or deleted.
    async fn append_event(&self, event: ItemEvent) -> Result<(), StoreError>;

    /// Returns a finite snapshot of the live items of one type. Each call
    /// stands alone; there is no persistent server-side cursor.
    async fn scan(&self, type_name: &str) -> Result<Vec<Item>, StoreError>;
}
