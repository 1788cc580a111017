//! # Stock Movement Handlers
//!
//! Lists the movement ledger and records manual inbound/outbound movements.
//! The movement type accepts `inbound`/`outbound` as well as the legacy
//! `entrada`/`saida` spellings.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockpile_core::{MovementType, NewStockMovement, StockMovement, StockMovementWithProduct};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppState;

/// A recorded stock movement.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementDto {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reason: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl From<StockMovement> for StockMovementDto {
    fn from(m: StockMovement) -> Self {
        StockMovementDto {
            id: m.id,
            product_id: m.product_id,
            movement_type: m.movement_type,
            quantity: m.quantity,
            reason: m.reason,
            date: m.date,
        }
    }
}

/// A movement row in listings, with the product's current name.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementListItemDto {
    #[serde(flatten)]
    pub movement: StockMovementDto,
    pub product_name: String,
}

impl From<StockMovementWithProduct> for StockMovementListItemDto {
    fn from(m: StockMovementWithProduct) -> Self {
        StockMovementListItemDto {
            movement: m.movement.into(),
            product_name: m.product_name,
        }
    }
}

/// Body of `POST /api/stock/movements`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementRequest {
    pub product_id: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reason: String,
}

impl From<CreateMovementRequest> for NewStockMovement {
    fn from(req: CreateMovementRequest) -> Self {
        NewStockMovement {
            product_id: req.product_id,
            movement_type: req.movement_type,
            quantity: req.quantity,
            reason: req.reason,
        }
    }
}

/// `GET /api/stock/movements`: newest first.
pub async fn list_movements(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockMovementListItemDto>>, ApiError> {
    let movements = state.db().movements().list().await?;
    Ok(Json(
        movements
            .into_iter()
            .map(StockMovementListItemDto::from)
            .collect(),
    ))
}

/// `POST /api/stock/movements`
///
/// An outbound movement larger than the current stock fails with
/// 400 `INSUFFICIENT_STOCK` and leaves stock unchanged.
pub async fn create_movement(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StockMovementDto>), ApiError> {
    let Json(req) = payload?;
    let movement = state.db().movements().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(movement.into())))
}
