//! The unit-of-work command.
//!
//! A command wraps one mutation lifecycle for one item. It is created by
//! exactly one of create / read-for-update / read-for-delete, owns the
//! baseline snapshot taken at creation, and is a single-owner, single-use
//! object: `save` transitions it to a terminal state, and a disposed
//! command can never be reused.

use crate::codec::encrypt_fields;
use crate::error::{ProviderError, ProviderResult, StoreError};
use crate::store::ItemStore;
use itemvault_crypto::CipherSet;
use itemvault_diff::compute_changes;
use itemvault_model::{EventPolicy, ItemShape};
use itemvault_types::{now_millis, Item, ItemEvent, SaveAction, VersionStamp};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle state of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    /// Created; the item is mutable through the command's handle.
    Open,
    /// Terminal success.
    Saved,
    /// Terminal error.
    Failed,
    /// Resources released; any further use fails.
    Disposed,
}

/// A unit of work wrapping one mutation of one item.
pub struct Command {
    shape: ItemShape,
    store: Arc<dyn ItemStore>,
    ciphers: Option<Arc<CipherSet>>,
    action: SaveAction,
    item: Item,
    baseline: Option<Item>,
    state: CommandState,
}

impl Command {
    pub(crate) fn for_create(
        shape: ItemShape,
        store: Arc<dyn ItemStore>,
        ciphers: Option<Arc<CipherSet>>,
        id: &str,
        partition_key: &str,
    ) -> Self {
        let item = Item::new(id, partition_key, shape.type_name().as_str());
        Self {
            shape,
            store,
            ciphers,
            action: SaveAction::Created,
            item,
            baseline: None,
            state: CommandState::Open,
        }
    }

    pub(crate) fn for_existing(
        shape: ItemShape,
        store: Arc<dyn ItemStore>,
        ciphers: Option<Arc<CipherSet>>,
        baseline: Item,
        action: SaveAction,
    ) -> Self {
        Self {
            shape,
            store,
            ciphers,
            action,
            item: baseline.clone(),
            baseline: Some(baseline),
            state: CommandState::Open,
        }
    }

    /// The command's lifecycle state.
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// The item in its current (plain) state. The version stamp reflects
    /// the committed write after a successful save.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Mutable handle to the item. Fails once the command has been
    /// saved, failed, or disposed.
    pub fn item_mut(&mut self) -> ProviderResult<&mut Item> {
        self.ensure_open()?;
        Ok(&mut self.item)
    }

    /// Sets the payload value at a JSON pointer, creating intermediate
    /// objects as needed.
    pub fn set(&mut self, pointer: &str, value: Value) -> ProviderResult<()> {
        self.ensure_open()?;
        set_pointer(&mut self.item.data, pointer, value)
            .map_err(ProviderError::Configuration)?;
        self.item.updated_at = now_millis();
        Ok(())
    }

    fn ensure_open(&self) -> ProviderResult<()> {
        if self.state == CommandState::Open {
            Ok(())
        } else {
            Err(ProviderError::CommandConsumed)
        }
    }

    /// Commits the unit of work.
    ///
    /// Serializes the current state (encrypting marked fields), runs the
    /// validator, computes changes against the baseline per the event
    /// policy, submits the conditional write gated on the baseline stamp,
    /// and appends exactly one audit event unless the policy is disabled.
    /// On success the command is `Saved` and the new stamp is returned; on
    /// any failure it is `Failed` and nothing was written.
    pub async fn save(&mut self) -> ProviderResult<VersionStamp> {
        self.ensure_open()?;
        match self.save_inner().await {
            Ok(stamp) => {
                self.state = CommandState::Saved;
                debug!(
                    type_name = self.shape.type_name().as_str(),
                    id = %self.item.id,
                    action = %self.action,
                    "command saved"
                );
                Ok(stamp)
            }
            Err(err) => {
                self.state = CommandState::Failed;
                if matches!(err, ProviderError::Conflict { .. }) {
                    warn!(
                        type_name = self.shape.type_name().as_str(),
                        id = %self.item.id,
                        "save lost the version race"
                    );
                }
                Err(err)
            }
        }
    }

    async fn save_inner(&mut self) -> ProviderResult<VersionStamp> {
        // Serialize first: a misconfigured cipher set must surface even
        // when validation would also fail.
        let mut record = self.item.clone();
        record.updated_at = now_millis();
        record.data = encrypt_fields(&self.shape, self.ciphers.as_ref(), &self.item.data)?;

        if let Some(validator) = self.shape.validator() {
            validator
                .validate(&self.item)
                .map_err(ProviderError::Validation)?;
        }

        let changes = match self.action {
            // No current state to diff against on delete.
            SaveAction::Deleted => Vec::new(),
            _ => compute_changes(
                &self.shape,
                self.baseline.as_ref().map(|b| &b.data),
                Some(&self.item.data),
            ),
        };

        let expected = self
            .baseline
            .as_ref()
            .map(|b| b.version_stamp.clone())
            .unwrap_or_else(|| record.version_stamp.clone());

        let write = match self.action {
            SaveAction::Created => self.store.insert(record).await,
            SaveAction::Updated => self.store.replace(record, &expected).await,
            SaveAction::Deleted => {
                let mut tombstone = record;
                tombstone.mark_deleted();
                self.store.delete(tombstone, &expected).await
            }
        };
        let stamp = write
            .map_err(|e| ProviderError::from_store(e, &self.item.id, &self.item.partition_key))?;
        self.item.version_stamp = stamp.clone();
        if self.action == SaveAction::Deleted {
            self.item.mark_deleted();
        }

        if self.shape.event_policy() != EventPolicy::Disabled {
            let changes = match (self.action, self.shape.event_policy()) {
                (SaveAction::Deleted, _) => None,
                (_, EventPolicy::NoChanges) => None,
                _ => Some(changes),
            };
            let event = ItemEvent::new(
                &self.item.id,
                &self.item.partition_key,
                self.action,
                changes,
            );
            self.store
                .append_event(event)
                .await
                .map_err(|e: StoreError| ProviderError::Store(e.to_string()))?;
        }

        Ok(stamp)
    }

    /// Releases the baseline snapshot. A disposed command can never be
    /// reused; dropping the command has the same effect.
    pub fn dispose(&mut self) {
        self.baseline = None;
        self.state = CommandState::Disposed;
    }
}

fn set_pointer(data: &mut Value, pointer: &str, value: Value) -> Result<(), String> {
    if !pointer.starts_with('/') || pointer.len() < 2 {
        return Err(format!("invalid JSON pointer {pointer:?}"));
    }
    let segments: Vec<&str> = pointer[1..].split('/').collect();
    let mut node = data;
    for segment in &segments[..segments.len() - 1] {
        node = match node {
            Value::Object(fields) => fields
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new())),
            Value::Array(items) => {
                let index: usize = segment
                    .parse()
                    .map_err(|_| format!("segment {segment:?} is not an array index"))?;
                items
                    .get_mut(index)
                    .ok_or_else(|| format!("array index {index} out of bounds"))?
            }
            other => {
                return Err(format!(
                    "cannot descend into {} at segment {segment:?}",
                    other_kind(other)
                ))
            }
        };
    }
    let last = segments[segments.len() - 1];
    match node {
        Value::Object(fields) => {
            fields.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index: usize = last
                .parse()
                .map_err(|_| format!("segment {last:?} is not an array index"))?;
            if index < items.len() {
                items[index] = value;
                Ok(())
            } else if index == items.len() {
                items.push(value);
                Ok(())
            } else {
                Err(format!("array index {index} out of bounds"))
            }
        }
        other => Err(format!(
            "cannot set {last:?} on {}",
            other_kind(other)
        )),
    }
}

fn other_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_pointer_top_level() {
        let mut data = json!({});
        set_pointer(&mut data, "/title", json!("hi")).unwrap();
        assert_eq!(data, json!({"title": "hi"}));
    }

    #[test]
    fn set_pointer_creates_intermediates() {
        let mut data = json!({});
        set_pointer(&mut data, "/meta/author/name", json!("kim")).unwrap();
        assert_eq!(data, json!({"meta": {"author": {"name": "kim"}}}));
    }

    #[test]
    fn set_pointer_array_element() {
        let mut data = json!({"tags": ["a", "b"]});
        set_pointer(&mut data, "/tags/1", json!("c")).unwrap();
        assert_eq!(data, json!({"tags": ["a", "c"]}));
    }

    #[test]
    fn set_pointer_array_append() {
        let mut data = json!({"tags": ["a"]});
        set_pointer(&mut data, "/tags/1", json!("b")).unwrap();
        assert_eq!(data, json!({"tags": ["a", "b"]}));
    }

    #[test]
    fn set_pointer_rejects_bad_pointer() {
        let mut data = json!({});
        assert!(set_pointer(&mut data, "title", json!(1)).is_err());
        assert!(set_pointer(&mut data, "/", json!(1)).is_err());
    }

    #[test]
    fn set_pointer_rejects_descent_into_scalar() {
        let mut data = json!({"n": 5});
        assert!(set_pointer(&mut data, "/n/deeper", json!(1)).is_err());
    }
}
