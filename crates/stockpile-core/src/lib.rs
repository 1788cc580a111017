//! # stockpile-core: Pure Business Logic for Stockpile
//!
//! Domain types and rules for a small inventory / point-of-sale backend.
//! Everything here is pure: no database, no network, no file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI                                   │   │
//! │  │   Dashboard ──► Products ──► Sales ──► Stock movements          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockpile-api (axum)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockpile-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stock   │  │ dashboard │  │   │
//! │  │   │  Product  │  │   Money   │  │ Adjustment│  │  windows  │  │   │
//! │  │   │   Sale    │  │  decimal  │  │  replay   │  │   stats   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockpile-db (Database Layer)                   │   │
//! │  │       SQLite queries, migrations, ledger transactions           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, StockMovement) and inputs
//! - [`money`] - Money type with integer arithmetic
//! - [`stock`] - Stock adjustment rules
//! - [`dashboard`] - Dashboard time windows and aggregate shape
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use stockpile_core::money::Money;
//! use stockpile_core::stock::{Direction, StockAdjustment};
//!
//! let unit_price = Money::from_cents(799);
//! let total = unit_price.checked_multiply_quantity(3).unwrap();
//! assert_eq!(total.cents(), 2397);
//!
//! let sale = StockAdjustment::new("product-id", Direction::Decrement, 3).unwrap();
//! assert_eq!(sale.apply(10), Some(7));
//! assert_eq!(sale.apply(2), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of product names, categories and customer names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a stock movement reason.
pub const MAX_REASON_LENGTH: usize = 500;

/// Largest quantity accepted for a single sale or movement.
///
/// Keeps `price × quantity` far from i64 overflow.
pub const MAX_QUANTITY: i64 = 1_000_000;
