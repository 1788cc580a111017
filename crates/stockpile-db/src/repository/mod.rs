//! # Repository Module
//!
//! Database repository implementations for Stockpile.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.sales().create(NewSale { .. })                             │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── create(&self, input) ─────┐                                       │
//! │                                 ▼                                       │
//! │                        ledger::adjust_stock(tx, ..)                    │
//! │                        (shared with StockMovementRepository)           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`SaleRepository`](sale::SaleRepository) - Sale ledger
//! - [`StockMovementRepository`](movement::StockMovementRepository) - Movement ledger
//! - [`DashboardRepository`](dashboard::DashboardRepository) - Read-only aggregates

pub mod dashboard;
mod ledger;
pub mod movement;
pub mod product;
pub mod sale;

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
