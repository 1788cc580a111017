//! # Dashboard Handler
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Today's sales  │  Month's sales  │  Products  │  Low stock            │
//! │     $ 80.00     │    $ 1,240.50   │     10     │     2                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Low stock: Red Bull Zero (3/5), Red Bull 250ml (4/5)                  │
//! │  Recent sales: last 5, newest first                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockpile_core::dashboard::{DashboardStats, DashboardWindow};
use stockpile_core::{Money, Product};
use ts_rs::TS;

use super::sales::SaleListItemDto;
use crate::error::ApiError;
use crate::state::AppState;

/// Summary of a product at or below its minimum stock.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProductDto {
    pub id: String,
    pub name: String,
    pub stock: i64,
    pub min_stock: i64,
}

impl From<Product> for LowStockProductDto {
    fn from(p: Product) -> Self {
        LowStockProductDto {
            id: p.id,
            name: p.name,
            stock: p.stock,
            min_stock: p.min_stock,
        }
    }
}

/// Dashboard figures.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub today_sales: Money,
    #[serde(with = "stockpile_core::money::decimal")]
    #[ts(type = "number")]
    pub month_sales: Money,
    pub total_products: i64,
    /// Number of entries in `low_stock_products`.
    pub low_stock: usize,
    pub low_stock_products: Vec<LowStockProductDto>,
    pub recent_sales: Vec<SaleListItemDto>,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(stats: DashboardStats) -> Self {
        DashboardStatsDto {
            low_stock: stats.low_stock_count(),
            today_sales: stats.today_sales,
            month_sales: stats.month_sales,
            total_products: stats.total_products,
            low_stock_products: stats
                .low_stock_products
                .into_iter()
                .map(LowStockProductDto::from)
                .collect(),
            recent_sales: stats
                .recent_sales
                .into_iter()
                .map(SaleListItemDto::from)
                .collect(),
        }
    }
}

/// `GET /api/dashboard/stats`
///
/// Day and month boundaries follow the server's local time zone.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStatsDto>, ApiError> {
    let stats = state.db().dashboard().stats(DashboardWindow::now()).await?;
    Ok(Json(stats.into()))
}
