//! # Cart
//!
//! The cart as an immutable value: every operation returns a new `Cart` and
//! leaves the original untouched.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Store operation           Transition              Resulting sequence   │
//! │  ───────────────           ──────────              ──────────────────   │
//! │                                                                         │
//! │  add (new product) ──────► with_appended(item) ──► [..., item]          │
//! │                                                                         │
//! │  add (existing) ─────────► with_incremented(id) ─► items[i].amount + 1  │
//! │                                                                         │
//! │  update_amount ──────────► with_amount(id, n) ───► items[i].amount = n  │
//! │                                                                         │
//! │  remove ─────────────────► without(id) ──────────► items minus [i]      │
//! │                                                                         │
//! │  Order is insertion order and survives every transition except         │
//! │  removal of the line itself.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, ProductId};
use crate::validation::validate_line_items;

/// An ordered sequence of line items, at most one per product.
///
/// Serializes as a plain JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from previously persisted line items.
    ///
    /// Fails if the sequence breaks the one-line-per-product invariant or
    /// holds a zero amount.
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<Self> {
        validate_line_items(&items)?;
        Ok(Cart { items })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up the line item for a product.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns true if the product has a line item.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Current amount for a product (0 if absent).
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Amount per product, as shown next to each product in the storefront grid.
    pub fn amounts(&self) -> BTreeMap<ProductId, u32> {
        self.items.iter().map(|item| (item.id, item.amount)).collect()
    }

    /// Calculates item count, total quantity and subtotal.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Appends a line item for a product not yet in the cart.
    pub fn with_appended(&self, item: LineItem) -> CoreResult<Cart> {
        if self.contains(item.id) {
            return Err(CoreError::AlreadyInCart(item.id));
        }

        let mut items = self.items.clone();
        items.push(item);
        Ok(Cart { items })
    }

    /// Replaces the amount of an existing line, in place.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> CoreResult<Cart> {
        let index = self.position(id)?;

        let mut items = self.items.clone();
        items[index] = items[index].with_amount(amount);
        Ok(Cart { items })
    }

    /// Increments the amount of an existing line by one, in place.
    pub fn with_incremented(&self, id: ProductId) -> CoreResult<Cart> {
        let current = self.get(id).ok_or(CoreError::NotInCart(id))?.amount;
        self.with_amount(id, current.saturating_add(1))
    }

    /// Drops the line for a product; the others keep their relative order.
    pub fn without(&self, id: ProductId) -> CoreResult<Cart> {
        let index = self.position(id)?;

        let mut items = self.items.clone();
        items.remove(index);
        Ok(Cart { items })
    }

    fn position(&self, id: ProductId) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CoreError::NotInCart(id))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Cart totals summary for display.
///
/// Lines without a readable price do not count towards the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.items.iter().map(|i| u64::from(i.amount)).sum(),
            subtotal: cart.items.iter().filter_map(LineItem::subtotal).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn item(id: u32, amount: u32, price_cents: i64) -> LineItem {
        let product = Product::new(ProductId::new(id))
            .with_attribute("title", format!("Product {}", id))
            .with_attribute("price", Money::from_cents(price_cents).to_decimal())
            .with_attribute("image", format!("https://example.com/{}.jpg", id));
        LineItem::from_product(&product, amount)
    }

    fn three_items() -> Cart {
        Cart::from_items(vec![item(1, 1, 1000), item(2, 2, 500), item(3, 1, 250)]).unwrap()
    }

    fn ids(cart: &Cart) -> Vec<u32> {
        cart.items().iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_append_goes_to_the_end() {
        let cart = three_items().with_appended(item(9, 1, 100)).unwrap();
        assert_eq!(ids(&cart), vec![1, 2, 3, 9]);
        assert_eq!(cart.amount_of(ProductId::new(9)), 1);
    }

    #[test]
    fn test_append_rejects_duplicate() {
        let err = three_items().with_appended(item(2, 1, 500)).unwrap_err();
        assert_eq!(err, CoreError::AlreadyInCart(ProductId::new(2)));
    }

    #[test]
    fn test_increment_keeps_position() {
        let original = three_items();
        let cart = original.with_incremented(ProductId::new(2)).unwrap();

        assert_eq!(ids(&cart), vec![1, 2, 3]);
        assert_eq!(cart.amount_of(ProductId::new(2)), 3);
        // The original snapshot is untouched
        assert_eq!(original.amount_of(ProductId::new(2)), 2);
    }

    #[test]
    fn test_with_amount_only_touches_target() {
        let cart = three_items().with_amount(ProductId::new(3), 7).unwrap();
        assert_eq!(cart.amounts().into_iter().collect::<Vec<_>>(), vec![
            (ProductId::new(1), 1),
            (ProductId::new(2), 2),
            (ProductId::new(3), 7),
        ]);
        assert_eq!(cart.get(ProductId::new(3)).unwrap().title(), Some("Product 3"));
    }

    #[test]
    fn test_without_preserves_relative_order() {
        let cart = three_items().without(ProductId::new(2)).unwrap();
        assert_eq!(ids(&cart), vec![1, 3]);
    }

    #[test]
    fn test_missing_target() {
        let cart = three_items();
        let missing = ProductId::new(42);
        assert_eq!(cart.without(missing), Err(CoreError::NotInCart(missing)));
        assert_eq!(cart.with_amount(missing, 2), Err(CoreError::NotInCart(missing)));
        assert_eq!(cart.with_incremented(missing), Err(CoreError::NotInCart(missing)));
        assert_eq!(cart.amount_of(missing), 0);
    }

    #[test]
    fn test_totals() {
        let totals = three_items().totals();
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total_quantity, 4);
        // 10.00 + 2 × 5.00 + 2.50
        assert_eq!(totals.subtotal, Money::from_cents(2250));
    }

    #[test]
    fn test_totals_skip_unpriced_lines() {
        let unpriced = LineItem::from_product(&Product::new(ProductId::new(9)), 3);
        let cart = three_items().with_appended(unpriced).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.total_quantity, 7);
        assert_eq!(totals.subtotal, Money::from_cents(2250));
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = Cart::from_items(vec![item(1, 2, 1000)]).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"amount\":2"));
    }
}
