//! The factory contract backing-store adapters implement.

use crate::error::ProviderResult;
use crate::provider::Provider;
use async_trait::async_trait;
use itemvault_model::ItemShape;
use serde_json::Value;

/// Liveness report for a factory and its store.
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    pub healthy: bool,
    /// Free-form diagnostic data for the hosting application's liveness
    /// endpoint.
    pub diagnostics: Value,
}

/// Creates providers over one backing store.
///
/// One implementation per concrete store. Registering the same type name
/// twice on one factory instance is a configuration error.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    /// Registers a shape and builds its provider.
    async fn create_provider(&self, shape: ItemShape) -> ProviderResult<Provider>;

    /// Reports store liveness.
    async fn status(&self) -> ProviderStatus;
}
