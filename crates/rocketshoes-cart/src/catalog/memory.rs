//! In-memory Catalog Service backed by a JSON fixture.
//!
//! The fixture uses the same layout as the storefront's mock API server:
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "...", "price": 179.9, "image": "..." }],
//!   "stock":    [{ "id": 1, "amount": 3 }]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rocketshoes_core::{Product, ProductId, Stock};

use super::CatalogService;
use crate::error::CatalogError;

/// Serialized form of an in-memory catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}

/// Catalog Service answering from memory, with optional artificial latency.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, Stock>,
    latency: Option<Duration>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a fixture.
    pub fn from_fixture(fixture: CatalogFixture) -> Self {
        InMemoryCatalog {
            products: fixture.products.into_iter().map(|p| (p.id, p)).collect(),
            stock: fixture.stock.into_iter().map(|s| (s.id, s)).collect(),
            latency: None,
        }
    }

    /// Parses a fixture document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Reads and parses a fixture file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Transport(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Adds (or replaces) a product.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id, product);
        self
    }

    /// Sets the available amount of a product.
    pub fn with_stock(mut self, id: ProductId, amount: u32) -> Self {
        self.stock.insert(id, Stock { id, amount });
        self
    }

    /// Delays every answer, so callers genuinely suspend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.pause().await;
        self.products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                resource: "Product",
                id,
            })
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.pause().await;
        self.stock
            .get(&id)
            .copied()
            .ok_or(CatalogError::NotFound {
                resource: "Stock",
                id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "products": [
            { "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "1.jpg" },
            { "id": 2, "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino", "price": 139.9, "image": "2.jpg" }
        ],
        "stock": [
            { "id": 1, "amount": 3 },
            { "id": 2, "amount": 5 }
        ]
    }"#;

    #[tokio::test]
    async fn test_fixture_lookup() {
        let catalog = InMemoryCatalog::from_json(FIXTURE).unwrap();

        let product = catalog.product(ProductId::new(2)).await.unwrap();
        assert_eq!(product.attributes.price().map(|p| p.cents()), Some(13990));
        assert_eq!(product.attributes.image(), Some("2.jpg"));

        let stock = catalog.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 3);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let catalog = InMemoryCatalog::from_json(FIXTURE).unwrap();
        let err = catalog.stock(ProductId::new(99)).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotFound {
                resource: "Stock",
                id: ProductId::new(99)
            }
        );
    }

    #[tokio::test]
    async fn test_builder_overrides_fixture() {
        let catalog = InMemoryCatalog::from_json(FIXTURE)
            .unwrap()
            .with_stock(ProductId::new(1), 0);
        assert_eq!(catalog.stock(ProductId::new(1)).await.unwrap().amount, 0);
    }

    #[test]
    fn test_malformed_fixture() {
        assert!(matches!(
            InMemoryCatalog::from_json("{ \"products\": 3 }"),
            Err(CatalogError::Decode(_))
        ));
    }
}
