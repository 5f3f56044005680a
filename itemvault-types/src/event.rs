//! Audit event types.
//!
//! Every successful command save emits exactly one `ItemEvent`. Events are
//! append-only: once persisted they are never mutated or deleted, forming
//! the audit trail for an item.

use crate::now_millis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an audit event.
/// Uses UUID v7 which embeds a timestamp for natural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The kind of write a command committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveAction {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for SaveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaveAction::Created => "CREATED",
            SaveAction::Updated => "UPDATED",
            SaveAction::Deleted => "DELETED",
        };
        write!(f, "{s}")
    }
}

/// One field-level delta between the baseline and saved state.
///
/// `address` is a JSON pointer into the item payload (e.g. "/publicMessage").
/// `None` means the value was missing at that address, which is distinct
/// from a JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub address: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
}

/// An append-only audit record of one committed mutation.
///
/// `changes` is `None` when the event policy omits change capture and for
/// all deletes, where there is no current state to diff against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEvent {
    pub id: EventId,
    pub related_id: String,
    pub partition_key: String,
    pub save_action: SaveAction,
    pub changes: Option<Vec<PropertyChange>>,
    pub timestamp: i64,
}

impl ItemEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(
        related_id: impl Into<String>,
        partition_key: impl Into<String>,
        save_action: SaveAction,
        changes: Option<Vec<PropertyChange>>,
    ) -> Self {
        Self {
            id: EventId::new(),
            related_id: related_id.into(),
            partition_key: partition_key.into(),
            save_action,
            changes,
            timestamp: now_millis(),
        }
    }
}
