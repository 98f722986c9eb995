//! HTTP Catalog Service client.
//!
//! Talks to the storefront API:
//! - `GET {base}/products/{id}` → [`Product`]
//! - `GET {base}/stock/{id}` → [`Stock`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use rocketshoes_core::{Product, ProductId, Stock};

use super::CatalogService;
use crate::config::CatalogSettings;
use crate::error::{CatalogError, ConfigError, ConfigResult};

/// Catalog Service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: Url,
    http: Client,
}

impl HttpCatalog {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// Without a timeout a stalled request stalls the cart operation waiting
    /// on it.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpCatalog {
            base_url: with_trailing_slash(base_url),
            http: builder.build()?,
        })
    }

    /// Creates a client from the `[catalog]` section of `cart.toml`.
    pub fn from_settings(settings: &CatalogSettings) -> ConfigResult<Self> {
        let base_url = Url::parse(&settings.base_url)?;
        HttpCatalog::new(base_url, settings.timeout())
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> Result<Url, CatalogError> {
        self.base_url
            .join(&format!("{}/{}", resource, id))
            .map_err(|e| CatalogError::Transport(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(resource, id)?;
        debug!(%url, "Catalog request");

        let response = self.http.get(url.clone()).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound {
                resource: singular(resource),
                id,
            }),
            status if !status.is_success() => Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response.json::<T>().await?),
        }
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_json("products", id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get_json("stock", id).await
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn singular(resource: &'static str) -> &'static str {
    match resource {
        "products" => "Product",
        "stock" => "Stock",
        other => other,
    }
}
