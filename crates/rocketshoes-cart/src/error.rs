//! # Cart Store Error Types
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Store Error Categories                       │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │ StockShortage   │  │    NotFound     │  │     Unexpected          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  OutOfStock     │  │  NotInCart      │  │  Catalog(..)            │ │
//! │  │                 │  │                 │  │  Persistence(..)        │ │
//! │  │                 │  │                 │  │  Serialization          │ │
//! │  │                 │  │                 │  │  Validation / Internal  │ │
//! │  └────────┬────────┘  └────────┬────────┘  └────────────┬────────────┘ │
//! │           │                    │                        │              │
//! │           ▼                    ▼                        ▼              │
//! │   "out of stock" text   operation failure text   operation failure text│
//! │                                                                         │
//! │  Every error ends as ONE message on the Notifier; the cart is left     │
//! │  exactly as it was.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rocketshoes_core::{CoreError, ProductId, ValidationError};
use thiserror::Error;

use crate::config::Messages;

/// Result type alias for store operations.
pub type CartResult<T> = Result<T, CartError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Catalog Errors
// =============================================================================

/// Failures talking to the Catalog Service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog has no record for this product.
    #[error("{resource} {id} not found in catalog")]
    NotFound { resource: &'static str, id: ProductId },

    /// Request never produced a response (DNS, connect, timeout, ...).
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// Catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape.
    #[error("Invalid catalog response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

// =============================================================================
// Persistence Errors
// =============================================================================

/// Failures reading or writing the persistence slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// Underlying storage I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// A writer panicked while holding the in-memory store.
    #[error("Storage lock poisoned")]
    Poisoned,

    /// No storage location could be determined.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err.to_string())
    }
}

// =============================================================================
// Cart Error
// =============================================================================

/// Tagged outcome of a failed store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Stock record cannot cover the requested amount.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// Operation needs a line item the cart does not have.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Catalog Service failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Persistence slot failure.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Cart could not be encoded for the slot.
    #[error("Failed to encode cart: {0}")]
    Serialization(String),

    /// Requested amount was rejected.
    #[error("Invalid request: {0}")]
    Validation(ValidationError),

    /// A cart invariant would have been broken.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for CartError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotInCart(id) => CartError::NotInCart(id),
            CoreError::Validation(e) => CartError::Validation(e),
            other @ CoreError::AlreadyInCart(_) => CartError::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Serialization(err.to_string())
    }
}

/// The three categories a user-facing message is chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected business condition.
    StockShortage,
    /// Operation referenced a product absent from the cart.
    NotFound,
    /// Anything else.
    Unexpected,
}

impl CartError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::OutOfStock { .. } => ErrorKind::StockShortage,
            CartError::NotInCart(_) => ErrorKind::NotFound,
            _ => ErrorKind::Unexpected,
        }
    }

    /// Picks the single message shown to the user for this failure.
    pub fn user_message<'m>(&self, operation: CartOperation, messages: &'m Messages) -> &'m str {
        match self.kind() {
            ErrorKind::StockShortage => &messages.out_of_stock,
            ErrorKind::NotFound | ErrorKind::Unexpected => messages.failure(operation),
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Mutating operations exposed by the Cart Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add"),
            CartOperation::Remove => write!(f, "remove"),
            CartOperation::UpdateAmount => write!(f, "update_amount"),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Failures loading, validating or saving `cart.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),

    /// Catalog base URL could not be parsed.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let stock = CartError::OutOfStock {
            product_id: ProductId::new(1),
            available: 2,
            requested: 3,
        };
        assert_eq!(stock.kind(), ErrorKind::StockShortage);
        assert_eq!(
            stock.to_string(),
            "Insufficient stock for product 1: available 2, requested 3"
        );

        assert_eq!(CartError::NotInCart(ProductId::new(1)).kind(), ErrorKind::NotFound);
        assert_eq!(
            CartError::from(CatalogError::Transport("refused".into())).kind(),
            ErrorKind::Unexpected
        );
        assert_eq!(
            CartError::from(PersistenceError::Poisoned).kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn test_user_message_selection() {
        let messages = Messages::default();
        let stock = CartError::OutOfStock {
            product_id: ProductId::new(1),
            available: 0,
            requested: 1,
        };

        // Stock shortage wins regardless of the operation
        assert_eq!(stock.user_message(CartOperation::Add, &messages), messages.out_of_stock);
        assert_eq!(
            stock.user_message(CartOperation::UpdateAmount, &messages),
            messages.out_of_stock
        );

        let missing = CartError::NotInCart(ProductId::new(1));
        assert_eq!(missing.user_message(CartOperation::Remove, &messages), messages.remove_failed);
        assert_eq!(
            missing.user_message(CartOperation::UpdateAmount, &messages),
            messages.update_failed
        );

        let transport = CartError::from(CatalogError::Transport("timeout".into()));
        assert_eq!(transport.user_message(CartOperation::Add, &messages), messages.add_failed);
    }

    #[test]
    fn test_core_error_conversion() {
        let err: CartError = CoreError::NotInCart(ProductId::new(4)).into();
        assert_eq!(err, CartError::NotInCart(ProductId::new(4)));

        let err: CartError = CoreError::AlreadyInCart(ProductId::new(4)).into();
        assert!(matches!(err, CartError::Internal(_)));
    }
}
