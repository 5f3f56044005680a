use crate::VersionStamp;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis() as i64
}

/// A persisted entity.
///
/// `id` and `partition_key` together form the stable identity and are
/// immutable after creation. The `data` field holds arbitrary JSON whose
/// structure is described by the registered shape. The `version_stamp`
/// changes on every successful write and is the optimistic-concurrency
/// precondition for the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub partition_key: String,
    pub type_name: String,
    pub version_stamp: VersionStamp,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub is_deleted: bool,
    pub data: serde_json::Value,
}

impl Item {
    /// Creates a fresh item with an empty object payload and a new stamp.
    #[must_use]
    pub fn new(id: impl Into<String>, partition_key: impl Into<String>, type_name: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: id.into(),
            partition_key: partition_key.into(),
            type_name: type_name.into(),
            version_stamp: VersionStamp::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_deleted: false,
            data: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Marks the item soft-deleted and stamps the deletion time.
    pub fn mark_deleted(&mut self) {
        let now = now_millis();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
