//! # Domain Types
//!
//! Core domain types used throughout Stockpile.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │◄──│      Sale       │   │  StockMovement  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  product_id     │   │  product_id ────┼──►    │
//! │  │  name/category  │   │  quantity       │   │  movement_type  │       │
//! │  │  price_cents    │   │  unit_price     │   │  quantity       │       │
//! │  │  stock          │   │  total_price    │   │  reason         │       │
//! │  │  min_stock      │   │  customer_name  │   │  date           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product is mutable (CRUD). Sale and StockMovement are append-only     │
//! │  ledgers; each insert is paired with a stock update in one transaction. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::stock::Direction;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form category ("Energy Drink", "Sugar Free", ...).
    pub category: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// Threshold at or below which the product counts as low stock.
    pub min_stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// True when `stock <= min_stock`.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// =============================================================================
// Movement Type
// =============================================================================

/// Direction of a stock movement.
///
/// Older browser clients send Portuguese wire names (`entrada` /
/// `saida`); both spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Goods received; stock goes up.
    #[serde(alias = "entrada")]
    Inbound,
    /// Goods removed (sale, loss, return to supplier); stock goes down.
    #[serde(alias = "saida")]
    Outbound,
}

impl MovementType {
    /// Returns the stock direction this movement applies.
    #[inline]
    pub const fn direction(&self) -> Direction {
        match self {
            MovementType::Inbound => Direction::Increment,
            MovementType::Outbound => Direction::Decrement,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "inbound",
            MovementType::Outbound => "outbound",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Append-only.
///
/// Uses the snapshot pattern: the unit price is frozen at the time of sale so
/// later price edits don't rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Product price at time of sale (frozen).
    pub unit_price_cents: i64,
    /// unit_price_cents × quantity.
    pub total_price_cents: i64,
    pub customer_name: Option<String>,
    pub date: DateTime<Utc>,
}

impl Sale {
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// A sale joined with its product's current name, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleWithProduct {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub sale: Sale,
    pub product_name: String,
}

// =============================================================================
// Stock Movement
// =============================================================================

/// An inbound or outbound stock adjustment. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reason: String,
    pub date: DateTime<Utc>,
}

impl StockMovement {
    /// Signed effect of this movement on the product's stock.
    #[inline]
    pub fn signed_quantity(&self) -> i64 {
        self.movement_type.direction().signed(self.quantity)
    }
}

/// A stock movement joined with its product's name, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockMovementWithProduct {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub movement: StockMovement,
    pub product_name: String,
}

// =============================================================================
// Inputs
// =============================================================================

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub min_stock: i64,
    /// Opening stock level. Later changes go through the ledger.
    pub stock: i64,
}

impl NewProduct {
    /// Trims text fields and checks every field rule.
    pub fn validated(mut self) -> ValidationResult<Self> {
        self.name = validation::validate_product_name(&self.name)?;
        self.category = validation::validate_category(&self.category)?;
        validation::validate_price(self.price)?;
        validation::validate_non_negative("minStock", self.min_stock)?;
        validation::validate_non_negative("stock", self.stock)?;
        Ok(self)
    }
}

/// Input for editing a product. Stock is deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub min_stock: i64,
}

impl ProductChanges {
    pub fn validated(mut self) -> ValidationResult<Self> {
        self.name = validation::validate_product_name(&self.name)?;
        self.category = validation::validate_category(&self.category)?;
        validation::validate_price(self.price)?;
        validation::validate_non_negative("minStock", self.min_stock)?;
        Ok(self)
    }
}

/// Input for registering a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub product_id: String,
    pub quantity: i64,
    pub customer_name: Option<String>,
}

impl NewSale {
    /// Checks the fields; a blank customer name becomes `None`.
    pub fn validated(mut self) -> ValidationResult<Self> {
        validation::validate_product_id(&self.product_id)?;
        validation::validate_quantity(self.quantity)?;
        self.customer_name = validation::normalize_customer_name(self.customer_name)?;
        Ok(self)
    }
}

/// Input for recording a stock movement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockMovement {
    pub product_id: String,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reason: String,
}

impl NewStockMovement {
    pub fn validated(mut self) -> ValidationResult<Self> {
        validation::validate_product_id(&self.product_id)?;
        validation::validate_quantity(self.quantity)?;
        self.reason = validation::validate_reason(&self.reason)?;
        Ok(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
