//! The provider: per-type entry point for commands and reads.

use crate::codec::decrypt_fields;
use crate::command::Command;
use crate::error::{ProviderError, ProviderResult};
use crate::store::ItemStore;
use itemvault_crypto::CipherSet;
use itemvault_model::{CommandOperations, ItemShape};
use itemvault_types::{Item, SaveAction};
use std::sync::Arc;
use tracing::debug;

/// Issues commands and reads for one registered entity type.
///
/// Constructed by a [`crate::ProviderFactory`] from an [`ItemShape`] and a
/// store handle. Every operation checks the type's operations mask before
/// contacting the store.
pub struct Provider {
    shape: ItemShape,
    store: Arc<dyn ItemStore>,
    ciphers: Option<Arc<CipherSet>>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("type_name", self.shape.type_name())
            .finish_non_exhaustive()
    }
}

impl Provider {
    /// Builds a provider for a shape.
    ///
    /// Fails with a configuration error when the shape declares encrypted
    /// fields but no cipher set is supplied.
    pub fn new(
        shape: ItemShape,
        store: Arc<dyn ItemStore>,
        ciphers: Option<Arc<CipherSet>>,
    ) -> ProviderResult<Self> {
        if shape.has_encrypted_fields() && ciphers.is_none() {
            return Err(ProviderError::Configuration(format!(
                "type {:?} declares encrypted fields but no cipher set is configured",
                shape.type_name().as_str()
            )));
        }
        Ok(Self {
            shape,
            store,
            ciphers,
        })
    }

    /// The registered shape this provider serves.
    pub fn shape(&self) -> &ItemShape {
        &self.shape
    }

    fn ensure_allowed(&self, op: CommandOperations, name: &str) -> ProviderResult<()> {
        if self.shape.operations().allows(op) {
            Ok(())
        } else {
            Err(ProviderError::Configuration(format!(
                "operation {name} is not enabled for type {:?}",
                self.shape.type_name().as_str()
            )))
        }
    }

    /// Opens a create command for a new item. Does not contact the store;
    /// existence is checked by the conditional insert at save time.
    pub fn create(&self, id: &str, partition_key: &str) -> ProviderResult<Command> {
        self.ensure_allowed(CommandOperations::CREATE, "create")?;
        debug!(type_name = self.shape.type_name().as_str(), id, "open create command");
        Ok(Command::for_create(
            self.shape.clone(),
            Arc::clone(&self.store),
            self.ciphers.clone(),
            id,
            partition_key,
        ))
    }

    /// Reads one item, decrypting marked fields. Soft-deleted or missing
    /// items read as `None`.
    pub async fn read(&self, id: &str, partition_key: &str) -> ProviderResult<Option<Item>> {
        self.ensure_allowed(CommandOperations::READ, "read")?;
        self.fetch(id, partition_key).await
    }

    /// Opens an update command baselined at the item's current stamp, or
    /// `None` if the item does not exist.
    pub async fn read_for_update(
        &self,
        id: &str,
        partition_key: &str,
    ) -> ProviderResult<Option<Command>> {
        self.ensure_allowed(CommandOperations::UPDATE, "update")?;
        Ok(self
            .fetch(id, partition_key)
            .await?
            .map(|baseline| self.command_for(baseline, SaveAction::Updated)))
    }

    /// Opens a delete command baselined at the item's current stamp, or
    /// `None` if the item does not exist.
    pub async fn read_for_delete(
        &self,
        id: &str,
        partition_key: &str,
    ) -> ProviderResult<Option<Command>> {
        self.ensure_allowed(CommandOperations::DELETE, "delete")?;
        Ok(self
            .fetch(id, partition_key)
            .await?
            .map(|baseline| self.command_for(baseline, SaveAction::Deleted)))
    }

    /// Returns a lazy sequence over the live items of this type matching
    /// `predicate`. Each invocation stands alone over a fresh finite
    /// snapshot — restart by calling again; cancel by dropping it.
    pub async fn query<F>(
        &self,
        predicate: F,
    ) -> ProviderResult<Box<dyn Iterator<Item = Item> + Send>>
    where
        F: Fn(&Item) -> bool + Send + 'static,
    {
        self.ensure_allowed(CommandOperations::READ, "query")?;
        let records = self
            .store
            .scan(self.shape.type_name().as_str())
            .await
            .map_err(|e| ProviderError::Store(e.to_string()))?;

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            items.push(self.into_plain(record)?);
        }
        Ok(Box::new(items.into_iter().filter(move |item| predicate(item))))
    }

    async fn fetch(&self, id: &str, partition_key: &str) -> ProviderResult<Option<Item>> {
        let record = self
            .store
            .read(self.shape.type_name().as_str(), id, partition_key)
            .await
            .map_err(|e| ProviderError::from_store(e, id, partition_key))?;
        record.map(|r| self.into_plain(r)).transpose()
    }

    fn into_plain(&self, mut record: Item) -> ProviderResult<Item> {
        record.data = decrypt_fields(&self.shape, self.ciphers.as_ref(), &record.data)?;
        Ok(record)
    }

    fn command_for(&self, baseline: Item, action: SaveAction) -> Command {
        Command::for_existing(
            self.shape.clone(),
            Arc::clone(&self.store),
            self.ciphers.clone(),
            baseline,
            action,
        )
    }
}
