use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};

use crate::models::{NewProduct, Product};
use crate::store::{ProductStore, StoreError, StoreResult};

/// Data layer over this crate's own HTTP API.
///
/// One request per call. A 404 on update or delete means the row is gone;
/// any other non-success status becomes [`StoreError::Status`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: i64) -> String {
        format!("{}/products/{}", self.base_url, id)
    }
}

fn ensure_success(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status.as_u16()))
    }
}

#[async_trait]
impl ProductStore for ApiClient {
    fn backend(&self) -> &'static str {
        "api"
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let response = self.client.get(self.products_url()).send().await?;
        Ok(ensure_success(response)?.json().await?)
    }

    #[instrument(skip(self, product))]
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let response = self
            .client
            .post(self.products_url())
            .json(&product)
            .send()
            .await?;
        let created: Product = ensure_success(response)?.json().await?;
        debug!(id = created.id, "Product created");
        Ok(created)
    }

    #[instrument(skip(self, product))]
    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>> {
        let response = self
            .client
            .put(self.product_url(id))
            .json(&product)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success(response)?.json().await?))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let response = self.client.delete(self.product_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        ensure_success(response)?;
        Ok(true)
    }
}
