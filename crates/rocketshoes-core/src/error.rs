//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CoreError        - Cart transition failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocketshoes-cart errors (separate crate)                              │
//! │  ├── CatalogError     - Catalog Service failures                       │
//! │  ├── PersistenceError - Slot read/write failures                       │
//! │  └── CartError        - Tagged result of a store operation             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → user message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by pure cart transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The transition targets a product that has no line item in the cart.
    ///
    /// ## When This Occurs
    /// - Removing a product that was never added
    /// - Changing the amount of a product removed in another tab
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A second line item for the same product was about to be inserted.
    ///
    /// The cart keeps at most one line item per product; callers increment
    /// the existing line instead.
    #[error("Product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two line items for one product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NotInCart(ProductId::new(7));
        assert_eq!(err.to_string(), "Product 7 is not in the cart");

        let err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Duplicate {
            field: "id".to_string(),
            value: "3".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
