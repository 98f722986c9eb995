//! # Money Module
//!
//! Provides the `Money` type for product prices and cart subtotals.
//!
//! ## Wire Format vs. Memory Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog JSON / persisted slot         Display & totals                 │
//! │  ─────────────────────────────         ────────────────                 │
//! │  "price": 179.9               ──────►  Money(17990)  (integer cents)    │
//! │  (kept verbatim in the line)           read-only, never written back    │
//! │                                                                         │
//! │  All arithmetic (line subtotals, cart subtotal) happens on cents, so   │
//! │  0.1 + 0.2 never shows up as 0.30000000000000004 on the cart page.     │
//! │  Arithmetic saturates instead of overflowing.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocketshoes_core::money::Money;
//!
//! let price = Money::from_cents(17990);
//! assert_eq!((price * 2).to_string(), "$359.80");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Serialized as a decimal number of major units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount of major units.
    ///
    /// Rounds to the nearest cent; out-of-range amounts saturate.
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value as a decimal amount of major units.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

/// Unit price × amount.
impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats as `$179.90`, `-$5.50` for negatives.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(17990).to_string(), "$179.90");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let price = Money::from_cents(13990);
        assert_eq!((price * 3).cents(), 41970);

        let mut total = Money::zero();
        total += price;
        assert_eq!(total + Money::from_cents(10), Money::from_cents(14000));

        let sum: Money = [Money::from_cents(1), Money::from_cents(2)].into_iter().sum();
        assert_eq!(sum.cents(), 3);
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(Money::from_decimal(139.9).cents(), 13990);
        assert_eq!(serde_json::to_string(&Money::from_cents(13990)).unwrap(), "139.9");

        // 0.1 + 0.2 style inputs still land on the right cent
        assert_eq!(Money::from_decimal(0.30000000000000004).cents(), 30);
    }

    #[test]
    fn test_huge_values_saturate() {
        let huge = Money::from_decimal(1e300);
        assert_eq!(huge.cents(), i64::MAX);
        assert_eq!((huge * u32::MAX).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let total: Money = [huge, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
