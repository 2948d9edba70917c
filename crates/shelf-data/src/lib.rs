//! HTTP client and remote catalog access for Shelf.
//!
//! This crate provides:
//! - `FetchClient` - a thin builder API over `reqwest` with a base URL
//! - `CatalogApi` - the remote catalog seen by the screens
//! - `RestCatalog` - `CatalogApi` over the mock REST resource
//! - `MemoryCatalog` - in-process `CatalogApi` with failure injection
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_data::{ApiConfig, CatalogApi, RestCatalog};
//!
//! let catalog = RestCatalog::new(&ApiConfig::default())?;
//! let products = catalog.list_products().await?;
//! let favorites = products.iter().filter(|p| p.status).count();
//! ```

mod catalog;
mod config;
mod error;
mod memory;
mod request;
mod response;

pub use catalog::{CatalogApi, RestCatalog, StatusUpdate};
pub use config::{ApiConfig, DEFAULT_BASE_URL, PRODUCT_RESOURCE};
pub use error::FetchError;
pub use memory::MemoryCatalog;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use tracing::debug;

/// HTTP client for making outbound requests.
///
/// A lightweight wrapper around a shared `reqwest::Client` that resolves
/// relative paths against a base URL and buffers responses.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client with reqwest's defaults.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Create a client from catalog settings: base URL and timeouts.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: Some(config.base_url.clone()),
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, full_url),
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request as it will be sent.
    pub fn describe(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        debug!(method = method.as_str(), url = %url, "sending request");
        let mut request = self.http.request(method.into(), &url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiConfig, CatalogApi, FetchClient, FetchError, MemoryCatalog, RestCatalog};
}
