//! In-memory reference adapter for ItemVault.
//!
//! The minimal implementation of the store primitive and factory contract:
//! a mutex-guarded map keyed by identity with an append-only event log.
//! Conditional writes are genuinely atomic — the stamp check and the
//! replacement happen under one lock — so the optimistic-concurrency
//! invariants hold under concurrent saves. Real adapters use this as the
//! behavioral reference.

use async_trait::async_trait;
use itemvault_crypto::CipherSet;
use itemvault_model::ItemShape;
use itemvault_provider::{
    ItemStore, Provider, ProviderError, ProviderFactory, ProviderResult, ProviderStatus,
    StoreError,
};
use itemvault_types::{Item, ItemEvent, VersionStamp};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

type Identity = (String, String, String);

/// Mutex-guarded in-memory item store with an append-only event log.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<Identity, Item>>,
    events: Mutex<Vec<ItemEvent>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn items(&self) -> Result<MutexGuard<'_, HashMap<Identity, Item>>, StoreError> {
        self.items
            .lock()
            .map_err(|_| StoreError::Unavailable("item lock poisoned".to_string()))
    }

    fn events(&self) -> Result<MutexGuard<'_, Vec<ItemEvent>>, StoreError> {
        self.events
            .lock()
            .map_err(|_| StoreError::Unavailable("event lock poisoned".to_string()))
    }

    fn key(item: &Item) -> Identity {
        (
            item.type_name.clone(),
            item.id.clone(),
            item.partition_key.clone(),
        )
    }

    /// Snapshot of the event log, in append order.
    pub fn event_log(&self) -> Vec<ItemEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of stored records, soft-deleted ones included.
    pub fn item_count(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    /// Number of appended events.
    pub fn event_count(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Raw stored record, encrypted fields and tombstones included.
    /// Test and diagnostics hook; providers go through `read`.
    pub fn raw(&self, type_name: &str, id: &str, partition_key: &str) -> Option<Item> {
        self.items.lock().ok().and_then(|items| {
            items
                .get(&(
                    type_name.to_string(),
                    id.to_string(),
                    partition_key.to_string(),
                ))
                .cloned()
        })
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn read(
        &self,
        type_name: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Option<Item>, StoreError> {
        let items = self.items()?;
        let key = (
            type_name.to_string(),
            id.to_string(),
            partition_key.to_string(),
        );
        Ok(items.get(&key).filter(|item| !item.is_deleted).cloned())
    }

    async fn insert(&self, mut item: Item) -> Result<VersionStamp, StoreError> {
        let mut items = self.items()?;
        let key = Self::key(&item);
        if items.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        let stamp = VersionStamp::new();
        item.version_stamp = stamp.clone();
        items.insert(key, item);
        Ok(stamp)
    }

    async fn replace(
        &self,
        mut item: Item,
        expected: &VersionStamp,
    ) -> Result<VersionStamp, StoreError> {
        let mut items = self.items()?;
        let key = Self::key(&item);
        let stored = items.get(&key).filter(|i| !i.is_deleted);
        let Some(stored) = stored else {
            return Err(StoreError::NotFound);
        };
        if stored.version_stamp != *expected {
            return Err(StoreError::Conflict);
        }
        let stamp = VersionStamp::new();
        item.version_stamp = stamp.clone();
        items.insert(key, item);
        Ok(stamp)
    }

    async fn delete(
        &self,
        mut item: Item,
        expected: &VersionStamp,
    ) -> Result<VersionStamp, StoreError> {
        let mut items = self.items()?;
        let key = Self::key(&item);
        let stored = items.get(&key).filter(|i| !i.is_deleted);
        let Some(stored) = stored else {
            return Err(StoreError::NotFound);
        };
        if stored.version_stamp != *expected {
            return Err(StoreError::Conflict);
        }
        let stamp = VersionStamp::new();
        item.version_stamp = stamp.clone();
        item.is_deleted = true;
        items.insert(key, item);
        Ok(stamp)
    }

    async fn append_event(&self, event: ItemEvent) -> Result<(), StoreError> {
        self.events()?.push(event);
        Ok(())
    }

    async fn scan(&self, type_name: &str) -> Result<Vec<Item>, StoreError> {
        let items = self.items()?;
        Ok(items
            .values()
            .filter(|item| item.type_name == type_name && !item.is_deleted)
            .cloned()
            .collect())
    }
}

/// Factory over one shared [`MemoryStore`].
pub struct MemoryProviderFactory {
    store: Arc<MemoryStore>,
    ciphers: Option<Arc<CipherSet>>,
    registered: Mutex<HashSet<String>>,
}

impl MemoryProviderFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Builds a factory over an existing store. Lets a reconfigured
    /// factory (e.g. after a key rotation) serve previously-written data.
    #[must_use]
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            ciphers: None,
            registered: Mutex::new(HashSet::new()),
        }
    }

    /// Configures the cipher set handed to every provider this factory
    /// creates.
    #[must_use]
    pub fn with_ciphers(mut self, ciphers: Arc<CipherSet>) -> Self {
        self.ciphers = Some(ciphers);
        self
    }

    /// The shared store underneath the factory's providers.
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }
}

impl Default for MemoryProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderFactory for MemoryProviderFactory {
    async fn create_provider(&self, shape: ItemShape) -> ProviderResult<Provider> {
        let name = shape.type_name().as_str().to_string();
        {
            let mut registered = self.registered.lock().map_err(|_| {
                ProviderError::Store("registration lock poisoned".to_string())
            })?;
            if !registered.insert(name.clone()) {
                return Err(ProviderError::Configuration(format!(
                    "type {name:?} is already registered on this factory"
                )));
            }
        }
        let provider = Provider::new(shape, self.store.clone(), self.ciphers.clone());
        if provider.is_err() {
            if let Ok(mut registered) = self.registered.lock() {
                registered.remove(&name);
            }
        }
        provider
    }

    async fn status(&self) -> ProviderStatus {
        let registered: Vec<String> = self
            .registered
            .lock()
            .map(|set| {
                let mut names: Vec<String> = set.iter().cloned().collect();
                names.sort();
                names
            })
            .unwrap_or_default();
        ProviderStatus {
            healthy: true,
            diagnostics: json!({
                "store": "memory",
                "items": self.store.item_count(),
                "events": self.store.event_count(),
                "registered_types": registered,
            }),
        }
    }
}
