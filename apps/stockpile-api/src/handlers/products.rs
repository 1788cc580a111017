//! # Product Handlers
//!
//! CRUD over the product catalog.
//!
//! Stock is only set once, at creation. Afterwards it changes through sales
//! and stock movements, so `PUT` ignores it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockpile_core::{Money, NewProduct, Product, ProductChanges};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;

/// Product as returned to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub stock: i64,
    pub min_stock: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            price: p.price(),
            id: p.id,
            name: p.name,
            category: p.category,
            stock: p.stock,
            min_stock: p.min_stock,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub min_stock: i64,
    /// Opening stock, 0 when omitted.
    #[serde(default)]
    #[ts(optional)]
    pub stock: Option<i64>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name,
            category: req.category,
            price: req.price,
            min_stock: req.min_stock,
            stock: req.stock.unwrap_or(0),
        }
    }
}

/// Body of `PUT /api/products/{id}`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub category: String,
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub min_stock: i64,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(req: UpdateProductRequest) -> Self {
        ProductChanges {
            name: req.name,
            category: req.category,
            price: req.price,
            min_stock: req.min_stock,
        }
    }
}

/// `GET /api/products`: all products ordered by name.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state.db().products().list().await?;
    debug!(count = products.len(), "Returning products");
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    let product = state
        .db()
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    Ok(Json(product.into()))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let Json(req) = payload?;
    let product = state.db().products().insert(req.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Json(req) = payload?;
    let product = state.db().products().update(&id, req.into()).await?;
    Ok(Json(product.into()))
}

/// `DELETE /api/products/{id}`
///
/// Fails with 409 while sales or movements still reference the product.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db().products().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
