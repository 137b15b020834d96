//! Storage behind the catalog.
//!
//! Every backend implements [`ProductStore`]. The server picks one at startup
//! from configuration and hands it to the handlers through `AppState`; the
//! client side drives the same trait against the HTTP API or the REST gateway.

pub mod gateway;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StorageConfig;
use crate::database;
use crate::models::{NewProduct, Product};

pub use gateway::GatewayStore;
pub use memory::MemoryStore;
pub use postgres::{PgProductStore, SqlAccessor};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response status {0}")]
    Status(u16),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("operation not supported by this backend: {0}")]
    Unsupported(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over the single `products` table.
///
/// `update` and `delete` report a missing id as `Ok(None)` / `Ok(false)`;
/// everything else that goes wrong is a [`StoreError`]. Nothing is retried.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    /// Replaces every field of the row. There is no partial patch.
    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Builds the configured backend. Runs once at startup.
pub async fn connect(config: &StorageConfig) -> StoreResult<Arc<dyn ProductStore>> {
    let store: Arc<dyn ProductStore> = match config {
        StorageConfig::Postgres(db) => Arc::new(PgProductStore::new(database::create_pool(db).await?)),
        StorageConfig::Gateway(gateway) => Arc::new(GatewayStore::new(gateway)),
        StorageConfig::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!(backend = store.backend(), "Product store ready");
    Ok(store)
}
