//! # Sale Handlers
//!
//! Lists the sale ledger and registers new sales. Registering a sale
//! decrements stock and appends an outbound movement in one transaction
//! (see `stockpile_db::SaleRepository::create`).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockpile_core::{Money, NewSale, Sale, SaleWithProduct};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;

/// A recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Product price at the time of sale.
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub unit_price: Money,
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub total_price: Money,
    pub customer_name: Option<String>,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl From<Sale> for SaleDto {
    fn from(s: Sale) -> Self {
        SaleDto {
            unit_price: Money::from_cents(s.unit_price_cents),
            total_price: s.total_price(),
            id: s.id,
            product_id: s.product_id,
            quantity: s.quantity,
            customer_name: s.customer_name,
            date: s.date,
        }
    }
}

/// A sale row in listings, with the product's current name.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleListItemDto {
    #[serde(flatten)]
    pub sale: SaleDto,
    pub product_name: String,
}

impl From<SaleWithProduct> for SaleListItemDto {
    fn from(s: SaleWithProduct) -> Self {
        SaleListItemDto {
            sale: s.sale.into(),
            product_name: s.product_name,
        }
    }
}

/// Body of `POST /api/sales`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default)]
    #[ts(optional)]
    pub customer_name: Option<String>,
}

impl From<CreateSaleRequest> for NewSale {
    fn from(req: CreateSaleRequest) -> Self {
        NewSale {
            product_id: req.product_id,
            quantity: req.quantity,
            customer_name: req.customer_name,
        }
    }
}

/// `GET /api/sales`: newest first.
pub async fn list_sales(
    State(state): State<AppState>,
) -> Result<Json<Vec<SaleListItemDto>>, ApiError> {
    let sales = state.db().sales().list().await?;
    Ok(Json(sales.into_iter().map(SaleListItemDto::from).collect()))
}

/// `POST /api/sales`
///
/// ## Errors
/// * 404 `NOT_FOUND` - unknown product
/// * 400 `INSUFFICIENT_STOCK` - quantity exceeds current stock; nothing is written
/// * 400 `VALIDATION_ERROR` - quantity not positive, malformed body
pub async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaleDto>), ApiError> {
    let Json(req) = payload?;
    let sale = state.db().sales().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(sale.into())))
}
