//! # Persistence Slot Port
//!
//! A key-value byte store the cart is mirrored into after every mutation and
//! read from once, when the store is opened.
//!
//! ## Slot Format
//! ```text
//! key:   "@RocketShoes:cart"
//! value: [{"id":1,"title":"...","price":179.9,"image":"...","amount":2}, ...]
//! ```

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

use rocketshoes_core::{Cart, LineItem};

use crate::error::{CartResult, PersistenceError};

/// Key-value byte storage for the cart.
pub trait PersistenceSlot: Send + Sync {
    /// Reads the bytes stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Overwrites the bytes stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), PersistenceError>;
}

/// Serializes a cart into slot bytes.
pub fn encode_cart(cart: &Cart) -> CartResult<Vec<u8>> {
    Ok(serde_json::to_vec(cart)?)
}

/// Parses slot bytes back into a cart.
///
/// Fails on malformed JSON and on sequences that break cart invariants.
pub fn decode_cart(bytes: &[u8]) -> CartResult<Cart> {
    let items: Vec<LineItem> = serde_json::from_slice(bytes)?;
    Ok(Cart::from_items(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartError;
    use rocketshoes_core::{Product, ProductId};

    fn item(id: u32, amount: u32) -> LineItem {
        let product = Product::new(ProductId::new(id))
            .with_attribute("title", format!("Product {}", id))
            .with_attribute("price", 179.9)
            .with_attribute("image", format!("{}.jpg", id));
        LineItem::from_product(&product, amount)
    }

    #[test]
    fn test_decode_reads_existing_storefront_format() {
        let bytes = br#"[{"id":3,"title":"Tenis","price":179.9,"image":"3.jpg","amount":2}]"#;
        let cart = decode_cart(bytes).unwrap();
        assert_eq!(cart.amount_of(ProductId::new(3)), 2);
        assert_eq!(cart.items()[0].price().map(|p| p.cents()), Some(17990));
    }

    #[test]
    fn test_catalog_attributes_are_stored_verbatim() {
        let stored = serde_json::json!([
            { "id": 1, "title": "T", "price": 179.999, "image": "i.jpg", "brand": "Nike", "amount": 1 },
            { "id": 2, "amount": 2 },
            { "id": 3, "title": "S", "price": "179.90", "amount": 1 }
        ]);

        let cart = decode_cart(&serde_json::to_vec(&stored).unwrap()).unwrap();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.amount_of(ProductId::new(2)), 2);

        let rewritten: serde_json::Value =
            serde_json::from_slice(&encode_cart(&cart).unwrap()).unwrap();
        assert_eq!(rewritten, stored);
    }

    #[test]
    fn test_encode_then_decode_preserves_order() {
        let cart = Cart::from_items(vec![item(5, 1), item(1, 4), item(3, 2)]).unwrap();
        let decoded = decode_cart(&encode_cart(&cart).unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decode_rejects_garbage_and_duplicates() {
        assert!(matches!(
            decode_cart(b"{not json"),
            Err(CartError::Serialization(_))
        ));

        let duplicated = serde_json::to_vec(&vec![item(1, 1), item(1, 2)]).unwrap();
        assert!(matches!(
            decode_cart(&duplicated),
            Err(CartError::Validation(_))
        ));
    }
}
