//! Remote catalog access.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelf_commerce::{Product, ProductId};
use tracing::debug;

use crate::config::PRODUCT_RESOURCE;
use crate::{ApiConfig, FetchClient, FetchError};

/// Body of a partial product update that only touches the favorite flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: bool,
}

/// The remote product catalog as seen by the screens.
///
/// The catalog is the source of truth for each product's favorite flag.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch every product in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError>;

    /// Set the favorite flag of a product.
    async fn update_status(&self, id: &ProductId, status: bool) -> Result<(), FetchError>;
}

/// `CatalogApi` over the REST resource: `GET /product`, `GET /product/:id`
/// and `PUT /product/:id`.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    client: FetchClient,
}

impl RestCatalog {
    /// Create a catalog client from connection settings.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: FetchClient::from_config(config)?,
        })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }

    fn item_path(id: &ProductId) -> String {
        format!("{}/{}", PRODUCT_RESOURCE, id)
    }
}

#[async_trait]
impl CatalogApi for RestCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let started = Instant::now();
        let products: Vec<Product> = self
            .client
            .get(PRODUCT_RESOURCE)
            .send()
            .await?
            .error_for_status()?
            .json()?;
        debug!(
            count = products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched catalog"
        );
        Ok(products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let started = Instant::now();
        let product: Product = self
            .client
            .get(Self::item_path(id))
            .send()
            .await?
            .error_for_status()?
            .json()?;
        debug!(
            product_id = %id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched product"
        );
        Ok(product)
    }

    async fn update_status(&self, id: &ProductId, status: bool) -> Result<(), FetchError> {
        self.client
            .put(Self::item_path(id))
            .json(&StatusUpdate { status })?
            .send()
            .await?
            .error_for_status()?;
        debug!(product_id = %id, status, "updated favorite status");
        Ok(())
    }
}
