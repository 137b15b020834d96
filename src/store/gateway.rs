// src/store/gateway.rs
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use tracing::{info, instrument, warn};

use super::{ProductStore, StoreError, StoreResult};
use crate::config::GatewayConfig;
use crate::models::{NewProduct, Product};

const PRODUCTS_PATH: &str = "/rest/v1/products";

/// Hosted REST-over-Postgres gateway (PostgREST dialect).
///
/// Authenticates with the public API key in both the `apikey` and the bearer
/// header. Rows are addressed with filter predicates (`id=eq.7`) instead of
/// path segments. The gateway variant never had an update path, so
/// [`ProductStore::update`] reports [`StoreError::Unsupported`].
#[derive(Clone)]
pub struct GatewayStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GatewayStore {
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), PRODUCTS_PATH),
            api_key: config.api_key.clone(),
        }
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }
}

fn ensure_success(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(%status, "Gateway request failed");
        Err(StoreError::Status(status.as_u16()))
    }
}

#[async_trait]
impl ProductStore for GatewayStore {
    fn backend(&self) -> &'static str {
        "gateway"
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let response = self
            .request(reqwest::Method::GET)
            .query(&[("select", "*"), ("order", "id.asc")])
            .send()
            .await?;
        Ok(ensure_success(response)?.json::<Vec<Product>>().await?)
    }

    #[instrument(skip(self, product))]
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(&product)
            .send()
            .await?;

        let created = ensure_success(response)?
            .json::<Vec<Product>>()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("gateway returned no inserted row".into()))?;
        info!(id = created.id, "Product inserted through gateway");
        Ok(created)
    }

    async fn update(&self, id: i64, _product: NewProduct) -> StoreResult<Option<Product>> {
        warn!(id, "Update requested against the REST gateway, which has no update path");
        Err(StoreError::Unsupported("update"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let response = self
            .request(reqwest::Method::DELETE)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let deleted = ensure_success(response)?.json::<Vec<Product>>().await?;
        Ok(!deleted.is_empty())
    }
}
