//! # Validation Module
//!
//! Input validation for cart operations.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  └── Amount spinner never goes below 1                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Requested amounts are positive and fit a line item                │
//! │  └── Loaded carts hold one line per product                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog Service                                              │
//! │  └── Stock check (performed by the Cart Store)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an absolute amount requested from the UI.
///
/// ## Rules
/// - `amount <= 0` → `MustBePositive` (the Cart Store ignores these silently)
/// - `amount > u32::MAX` → `OutOfRange`
///
/// ## Example
/// ```rust
/// use rocketshoes_core::validation::validate_amount;
///
/// assert_eq!(validate_amount(3).unwrap(), 3);
/// assert!(validate_amount(0).is_err());
/// assert!(validate_amount(-5).is_err());
/// ```
pub fn validate_amount(amount: i64) -> ValidationResult<u32> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    u32::try_from(amount).map_err(|_| ValidationError::OutOfRange {
        field: "amount".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Validates a sequence of line items loaded from storage.
///
/// ## Rules
/// - At most one line item per product
/// - Every amount is at least 1
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if item.amount == 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("amount of product {}", item.id),
            });
        }

        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attributes, ProductId};

    fn item(id: u32, amount: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            attributes: Attributes::new(),
            amount,
        }
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(1), Ok(1));
        assert!(matches!(
            validate_amount(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_amount(-5),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_amount(i64::from(u32::MAX) + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_line_items() {
        assert!(validate_line_items(&[]).is_ok());
        assert!(validate_line_items(&[item(1, 1), item(2, 3)]).is_ok());

        let err = validate_line_items(&[item(1, 1), item(1, 2)]).unwrap_err();
        assert_eq!(err.to_string(), "id '1' already exists");

        assert!(validate_line_items(&[item(1, 0)]).is_err());
    }
}
