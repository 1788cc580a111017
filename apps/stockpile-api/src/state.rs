//! # Application State
//!
//! Shared state handed to every handler through axum's `State` extractor.
//!
//! `Database` wraps a `SqlitePool`, which is already reference-counted and
//! thread-safe, so cloning the state per request is cheap and needs no lock.
//!
//! ## Usage in Handlers
//! ```rust,ignore
//! async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, ApiError> {
//!     let products = state.db().products().list().await?;
//!     Ok(Json(products.into_iter().map(ProductDto::from).collect()))
//! }
//! ```

use stockpile_db::Database;

/// State shared by all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    /// Creates the state around an open database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }

    /// Returns the database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }
}
