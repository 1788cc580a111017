//! # HTTP Handlers
//!
//! All routes exposed to the browser UI.
//!
//! ## Handler Organization
//! ```text
//! handlers/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── products.rs   ◄─── Product CRUD
//! ├── sales.rs      ◄─── Sale ledger (list, register)
//! ├── stock.rs      ◄─── Stock movement ledger (list, record)
//! ├── dashboard.rs  ◄─── Dashboard aggregates
//! └── health.rs     ◄─── Liveness probe
//! ```
//!
//! ## How Handlers Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Flow                                         │
//! │                                                                         │
//! │  fetch('/api/sales', { method: 'POST', body: JSON.stringify({          │
//! │    productId, quantity: 2, customerName: 'Ana'                          │
//! │  }) })                                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn create_sale(                                                  │
//! │      State(state): State<AppState>,                                     │
//! │      payload: Result<Json<CreateSaleRequest>, JsonRejection>,           │
//! │  ) -> Result<(StatusCode, Json<SaleDto>), ApiError>                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  201 { id, productId, quantity, unitPrice, totalPrice, ... }           │
//! │  400 { error, code: "INSUFFICIENT_STOCK" }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! DTOs live next to their handlers. They use camelCase on the wire, decimal
//! numbers for money and derive `ts_rs::TS` so the UI gets matching types.

pub mod dashboard;
pub mod health;
pub mod products;
pub mod sales;
pub mod stock;
