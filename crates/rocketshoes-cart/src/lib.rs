//! # rocketshoes-cart: Cart Store
//!
//! The client-side shopping cart of the RocketShoes storefront: an owned
//! store that checks stock with the catalog, mirrors the cart into a
//! persistence slot and publishes every accepted change.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Store Wiring                               │
//! │                                                                         │
//! │   UI consumer ──add/remove/update_amount──►  CartStore (CartHandle)    │
//! │        ▲                                        │     │      │          │
//! │        │ watch::Receiver<CartSnapshot>          │     │      │          │
//! │        └────────────────────────────────────────┘     │      │          │
//! │                                                       ▼      ▼          │
//! │                          CatalogService ◄──── stock/product  │          │
//! │                          (HTTP or in-memory)                 │          │
//! │                                                              ▼          │
//! │                          PersistenceSlot ◄──── JSON array under key     │
//! │                          (file or memory)                               │
//! │                                                                         │
//! │                          Notifier ◄──── one message per failure         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use rocketshoes_cart::{CartStore, HttpCatalog, FileSlot, TracingNotifier, CartConfig, StoreSettings};
//! use rocketshoes_core::ProductId;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::load_or_default(None);
//! let store = CartStore::open(
//!     Arc::new(HttpCatalog::from_settings(&config.catalog)?),
//!     Arc::new(FileSlot::in_data_dir()?),
//!     Arc::new(TracingNotifier),
//!     StoreSettings::from(&config),
//! );
//!
//! store.add(ProductId::new(1)).await;
//! println!("{} line(s)", store.cart().len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod notifier;
pub mod slot;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogFixture, CatalogService, HttpCatalog, InMemoryCatalog};
pub use config::{CartConfig, CatalogSettings, Messages, StorageSettings};
pub use error::{
    CartError, CartOperation, CartResult, CatalogError, ConfigError, ConfigResult, ErrorKind,
    PersistenceError,
};
pub use notifier::{ChannelNotifier, Notification, Notifier, TracingNotifier};
pub use slot::{FileSlot, MemorySlot, PersistenceSlot};
pub use store::{CartHandle, CartSnapshot, CartStore, StoreSettings};
