//! # Stock Adjustment Rules
//!
//! Pure rules behind every stock change. The database layer runs these
//! inside a transaction; nothing here touches storage.
//!
//! ## Adjustment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale (qty 3)            StockMovement (outbound, 3)                    │
//! │       │                          │                                      │
//! │       └────────────┬─────────────┘                                      │
//! │                    ▼                                                    │
//! │  StockAdjustment { product_id, Decrement, 3 }   delta = -3             │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  apply(current = 10) → Ok(7)                                           │
//! │  apply(current = 2)  → Err(InsufficientStock { available: 2, ... })    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, StockMovement};
use crate::validation::{validate_quantity, ValidationResult};

/// Which way a stock adjustment moves the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// Applies the sign of this direction to a positive quantity.
    #[inline]
    pub const fn signed(&self, quantity: i64) -> i64 {
        match self {
            Direction::Increment => quantity,
            Direction::Decrement => -quantity,
        }
    }
}

/// A validated request to move a product's stock by `quantity` units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    product_id: String,
    direction: Direction,
    quantity: i64,
}

impl StockAdjustment {
    /// Builds an adjustment. The quantity must be strictly positive.
    ///
    /// ```rust
    /// use stockpile_core::stock::{Direction, StockAdjustment};
    ///
    /// let adj = StockAdjustment::new("p-1", Direction::Decrement, 4).unwrap();
    /// assert_eq!(adj.delta(), -4);
    /// assert!(StockAdjustment::new("p-1", Direction::Increment, 0).is_err());
    /// ```
    pub fn new(
        product_id: impl Into<String>,
        direction: Direction,
        quantity: i64,
    ) -> ValidationResult<Self> {
        validate_quantity(quantity)?;
        Ok(Self {
            product_id: product_id.into(),
            direction,
            quantity,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Signed change applied to the stock counter.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.direction.signed(self.quantity)
    }

    /// Returns the stock level after this adjustment, or `None` if it would
    /// go negative (or overflow).
    pub fn apply(&self, current: i64) -> Option<i64> {
        current.checked_add(self.delta()).filter(|next| *next >= 0)
    }

    /// Checks the adjustment against a loaded product.
    ///
    /// Increments always succeed; decrements fail with `InsufficientStock`
    /// when `product.stock < quantity`.
    pub fn check(&self, product: &Product) -> CoreResult<i64> {
        self.apply(product.stock)
            .ok_or_else(|| CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: self.quantity,
            })
    }
}

/// Recomputes a stock level from an opening balance and a movement ledger.
///
/// Returns `None` if the ledger would have driven stock negative at any point,
/// which an intact ledger never does.
pub fn replay_movements<'a, I>(opening: i64, movements: I) -> Option<i64>
where
    I: IntoIterator<Item = &'a StockMovement>,
{
    movements.into_iter().try_fold(opening, |level, movement| {
        level
            .checked_add(movement.signed_quantity())
            .filter(|next| *next >= 0)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
