//! # rocketshoes-core: Pure Cart Logic for the RocketShoes Storefront
//!
//! This crate holds the cart data model and every cart transition as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RocketShoes Cart Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI / CLI                          │   │
//! │  │      Product grid ──► Cart page ──► Amount controls             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartHandle                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             rocketshoes-cart (Cart Store, async)                │   │
//! │  │   add / remove / update_amount ──► catalog, slot, notifier      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ rocketshoes-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  amounts  │   │   │
//! │  │   │  Stock    │  │  $179.90  │  │ CartTotals│  │           │   │   │
//! │  │   │  LineItem │  │           │  │           │  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, Stock, LineItem)
//! - [`money`] - Money type with integer cents
//! - [`cart`] - Immutable cart snapshots and their transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Requested amount validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{Cart, LineItem, Product, ProductId};
//!
//! let sneaker = Product::new(ProductId::new(1))
//!     .with_attribute("title", "Tênis de Caminhada Leve Confortável")
//!     .with_attribute("price", 179.9)
//!     .with_attribute("image", "https://example.com/sneaker.jpg");
//!
//! let cart = Cart::new()
//!     .with_appended(LineItem::from_product(&sneaker, 1))
//!     .unwrap()
//!     .with_incremented(ProductId::new(1))
//!     .unwrap();
//!
//! assert_eq!(cart.amount_of(ProductId::new(1)), 2);
//! assert_eq!(cart.totals().subtotal.to_string(), "$359.80");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Well-known key of the persistence slot holding the cart.
///
/// Kept identical to the key the storefront has always used so carts saved
/// by earlier builds are picked up after an upgrade.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";
