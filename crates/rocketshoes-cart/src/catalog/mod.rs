//! # Catalog Service Port
//!
//! The cart never owns product data or stock levels; it asks the Catalog
//! Service for them and suspends until the answer arrives.
//!
//! ```text
//! ┌──────────────┐   product(id) ──►  ┌───────────────────────────────┐
//! │  CartStore   │                    │  CatalogService               │
//! │              │   stock(id)   ──►  │  ├── HttpCatalog (reqwest)    │
//! │              │ ◄── Product/Stock  │  └── InMemoryCatalog (fixture)│
//! └──────────────┘                    └───────────────────────────────┘
//! ```

mod http;
mod memory;

pub use http::HttpCatalog;
pub use memory::{CatalogFixture, InMemoryCatalog};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use rocketshoes_core::{Product, ProductId, Stock};

use crate::error::CatalogError;

/// Read-only access to product details and stock levels.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches the display attributes of a product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetches the stock record of a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}
