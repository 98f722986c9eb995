//! # Domain Types
//!
//! Core domain types shared by the Cart Store, the catalog adapters and the
//! storefront front end.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Stock       │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  attributes     │   │  amount         │   │  attributes     │       │
//! │  │  (as served)    │   │  (available)    │   │  (frozen copy)  │       │
//! │  │                 │   │                 │   │  amount         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product and Stock are owned by the Catalog Service.                   │
//! │  LineItem is owned by the cart.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! A persisted cart is a JSON array of line items. Everything except `id` and
//! `amount` is kept exactly as the catalog served it:
//! ```json
//! [{ "id": 1, "title": "Tênis", "price": 179.9, "image": "https://...", "amount": 2 }]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// Identifier of a product, shared with the Catalog Service.
///
/// Serializes as the bare number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw catalog identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    /// Returns the raw catalog identifier.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Display Attributes
// =============================================================================

/// Display attributes of a product, opaque to the cart.
///
/// Whatever the catalog sends besides `id` lands here and is written back
/// unchanged. The accessors only read the well-known keys for display and
/// totals; a missing or oddly typed value reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Product name.
    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    /// Image URL, displayed as-is.
    pub fn image(&self) -> Option<&str> {
        self.get("image").and_then(Value::as_str)
    }

    /// Unit price, rounded to the cent for display and totals.
    ///
    /// Accepts a JSON number or a numeric string. The stored value itself is
    /// never rewritten.
    pub fn price(&self) -> Option<Money> {
        let amount = match self.get("price")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        amount.is_finite().then(|| Money::from_decimal(amount))
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Attributes(iter.into_iter().collect())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Product {
    /// Creates a product with no display attributes.
    pub fn new(id: ProductId) -> Self {
        Product {
            id,
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Available quantity of a product, as served by `GET /stock/{id}`.
///
/// The cart only ever reads stock records; it never decrements them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    /// Checks whether `requested` units can be taken from this record.
    #[inline]
    pub fn covers(&self, requested: u32) -> bool {
        self.amount >= requested
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product-and-amount entry in the cart.
///
/// Display attributes are frozen when the product is first added; a later
/// price change in the catalog does not alter a line already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Attributes,
    /// Requested quantity, always at least 1.
    pub amount: u32,
}

impl LineItem {
    /// Creates a line item from a catalog product.
    ///
    /// A catalog attribute named `amount` is overridden by the line's own.
    pub fn from_product(product: &Product, amount: u32) -> Self {
        let mut attributes = product.attributes.clone();
        attributes.0.remove("amount");

        LineItem {
            id: product.id,
            attributes,
            amount,
        }
    }

    /// Returns a copy of this line with a different amount.
    ///
    /// Identity and display attributes are preserved.
    pub fn with_amount(&self, amount: u32) -> Self {
        LineItem {
            amount,
            ..self.clone()
        }
    }

    /// Product name, if the catalog provided one.
    pub fn title(&self) -> Option<&str> {
        self.attributes.title()
    }

    /// Unit price, if the catalog provided a readable one.
    pub fn price(&self) -> Option<Money> {
        self.attributes.price()
    }

    /// Unit price × amount, if the price is readable.
    pub fn subtotal(&self) -> Option<Money> {
        self.price().map(|price| price * self.amount)
    }
}
