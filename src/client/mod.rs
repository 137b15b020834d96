//! Front-end side of the catalog: a data layer that talks to the HTTP API
//! (or straight to the REST gateway), plus the list view and its controller.

pub mod api;
pub mod app;
pub mod form;
pub mod view;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::store::{GatewayStore, ProductStore};

pub use api::ApiClient;
pub use app::CatalogApp;
pub use form::{FormError, ProductForm};
pub use view::{CatalogView, ItemState, ListItem, PendingAction};

/// Picks the data layer for the front end from configuration.
pub fn connect(config: &ClientConfig) -> Arc<dyn ProductStore> {
    match config {
        ClientConfig::Api { base_url } => Arc::new(ApiClient::new(base_url)),
        ClientConfig::Gateway(gateway) => Arc::new(GatewayStore::new(gateway)),
    }
}
