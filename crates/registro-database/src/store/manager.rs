//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use registro_core::config::StoreConfig;
use registro_core::error::AppError;
use registro_core::result::AppResult;
use registro_core::traits::store::{StoreHealth, StoreProvider};
use registro_core::types::{Query, QueryResponse};

use super::memory::MemoryStoreProvider;
use super::rest::RestStoreProvider;

/// Store manager wrapping the configured provider.
///
/// Constructed once at startup and shared; repositories receive the inner
/// provider as an `Arc<dyn StoreProvider>`.
#[derive(Debug, Clone)]
pub struct StoreManager {
    inner: Arc<dyn StoreProvider>,
}

impl StoreManager {
    /// Create a store manager from configuration.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        config.validate()?;
        let inner: Arc<dyn StoreProvider> = match config.provider.as_str() {
            "rest" => Arc::new(RestStoreProvider::new(config)?),
            "memory" => {
                info!("Initializing in-memory store provider");
                Arc::new(MemoryStoreProvider::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: rest, memory"
                )));
            }
        };
        Ok(Self { inner })
    }

    /// Create a store manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn StoreProvider>) -> Self {
        Self { inner: provider }
    }

    /// Shared handle to the inner provider.
    pub fn provider(&self) -> Arc<dyn StoreProvider> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl StoreProvider for StoreManager {
    async fn execute(&self, query: Query) -> AppResult<QueryResponse> {
        self.inner.execute(query).await
    }

    async fn health_check(&self, verify_auth: bool) -> AppResult<StoreHealth> {
        self.inner.health_check(verify_auth).await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
