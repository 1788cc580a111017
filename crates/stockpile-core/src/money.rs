//! # Money
//!
//! Prices, sale totals and dashboard sums are integer cents. Decimals only
//! appear at the JSON boundary, through the [`decimal`] serde adapter.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser  { "price": 4.5 }                                              │
//! │      │  decimal::deserialize  → round to nearest cent                  │
//! │      ▼                                                                  │
//! │  Money(450)  ── × quantity (checked) ──►  Sale.total_price_cents       │
//! │      │                                                                  │
//! │      │  SUM(total_price_cents) in SQLite, never float addition          │
//! │      ▼                                                                  │
//! │  decimal::serialize  → { "todaySales": 13.5 }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use stockpile_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let total = price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(total.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in cents.
///
/// Signed so that it can hold any `i64` column value; product prices are
/// kept non-negative by validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Converts a decimal amount received over the wire into cents.
    ///
    /// Rounds to the nearest cent. Returns `None` for NaN, infinities and
    /// values that do not fit in i64 cents.
    ///
    /// ```rust
    /// use stockpile_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(4.5).unwrap().cents(), 450);
    /// assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// The amount as a decimal number. JSON output only; never add these.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price × quantity, or `None` on overflow.
    ///
    /// ```text
    /// Red Bull 250ml  $2.99  × 3  →  Sale.total_price  $8.97
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// `$10.99` style, for log lines. The UI formats currency itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter that writes `Money` as a JSON decimal number.
///
/// The browser UI sends and displays prices as plain numbers (`4.5`), so DTOs
/// use `#[serde(with = "stockpile_core::money::decimal")]`. Values are rounded
/// to the nearest cent on the way in.
pub mod decimal {
    use super::Money;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("invalid monetary amount: {}", amount)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct PriceTag {
        #[serde(with = "decimal")]
        price: Money,
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(i64::MIN).to_string(), "-$92233720368547758.08");
    }

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::from_decimal(12.5).unwrap().cents(), 1250);
        assert_eq!(Money::from_decimal(19.999).unwrap().cents(), 2000);
        assert_eq!(Money::from_decimal(0.0).unwrap().cents(), 0);
        assert_eq!(Money::from_decimal(-1.0).unwrap().cents(), -100);
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(1e30).is_none());

        // 2^63 cents is one past i64::MAX; -2^63 is exactly i64::MIN.
        let two_pow_63 = 9_223_372_036_854_775_808.0_f64;
        assert!(Money::from_decimal(two_pow_63 / 100.0).is_none());
        assert_eq!(Money::from_decimal(-two_pow_63 / 100.0).unwrap().cents(), i64::MIN);
    }

    #[test]
    fn test_decimal_output() {
        assert_eq!(Money::from_cents(450).to_decimal(), 4.5);
        assert_eq!(Money::from_cents(499).to_decimal(), 4.99);
    }

    #[test]
    fn test_checked_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.checked_multiply_quantity(3).unwrap().cents(), 897);
        assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
    }

    #[test]
    fn test_decimal_wire_format() {
        let tag: PriceTag = serde_json::from_str(r#"{"price": 7.25}"#).unwrap();
        assert_eq!(tag.price.cents(), 725);

        let json = serde_json::to_string(&PriceTag { price: Money::from_cents(450) }).unwrap();
        assert_eq!(json, r#"{"price":4.5}"#);

        let integer: PriceTag = serde_json::from_str(r#"{"price": 3}"#).unwrap();
        assert_eq!(integer.price.cents(), 300);

        assert!(serde_json::from_str::<PriceTag>(r#"{"price": "4.50"}"#).is_err());
    }
}
