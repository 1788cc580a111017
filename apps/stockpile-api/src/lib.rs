//! # Stockpile API Library
//!
//! HTTP/JSON server for the Stockpile inventory service.
//!
//! ## Module Organization
//! ```text
//! stockpile_api/
//! ├── lib.rs          ◄─── You are here (router & tracing setup)
//! ├── main.rs         ◄─── Binary: config, bind, graceful shutdown
//! ├── config.rs       ◄─── ApiConfig (defaults → TOML → env)
//! ├── state.rs        ◄─── AppState shared by handlers
//! ├── error.rs        ◄─── ApiError → JSON error responses
//! └── handlers/
//!     ├── products.rs ◄─── Product CRUD
//!     ├── sales.rs    ◄─── Sale ledger
//!     ├── stock.rs    ◄─── Stock movement ledger
//!     ├── dashboard.rs◄─── Dashboard aggregates
//!     └── health.rs   ◄─── Liveness probe
//! ```
//!
//! ## Routes
//! ```text
//! GET    /api/health
//! GET    /api/products              POST /api/products
//! GET    /api/products/{id}         PUT  /api/products/{id}    DELETE /api/products/{id}
//! GET    /api/sales                 POST /api/sales
//! GET    /api/stock/movements       POST /api/stock/movements
//! GET    /api/dashboard/stats
//! *      (anything else)            static UI when configured, else 404
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{ApiError, ErrorCode};
use handlers::{dashboard, health, products, sales, stock};
pub use state::AppState;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,stockpile=debug,sqlx=warn";

/// Builds the application router.
///
/// When `static_dir` is given, paths outside `/api` are served from it and
/// unknown paths fall back to its `index.html` (client-side routing).
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/sales", get(sales::list_sales).post(sales::create_sale))
        .route(
            "/stock/movements",
            get(stock::list_movements).post(stock::create_movement),
        )
        .route("/dashboard/stats", get(dashboard::get_stats))
        .fallback(api_not_found);

    let router = Router::new().nest("/api", api);

    let router = match static_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving static UI");
            router.fallback_service(
                ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
            )
        }
        None => router.fallback(api_not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn api_not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "Route not found")
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockpile=trace` - Show trace for stockpile crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
