//! # Dashboard Repository
//!
//! Read-only aggregates for the dashboard. All queries run in one read
//! transaction so the figures come from the same snapshot.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockpile_core::dashboard::{DashboardStats, DashboardWindow, RECENT_SALES_LIMIT};
use stockpile_core::{Money, Product, SaleWithProduct};

/// Repository for dashboard statistics.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DashboardRepository { pool }
    }

    /// Computes the dashboard figures for the given time windows.
    pub async fn stats(&self, window: DashboardWindow) -> DbResult<DashboardStats> {
        let mut tx = self.pool.begin().await?;

        let today_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_price_cents), 0) FROM sales WHERE date >= ?1",
        )
        .bind(window.today_start)
        .fetch_one(&mut *tx)
        .await?;

        let month_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_price_cents), 0) FROM sales WHERE date >= ?1",
        )
        .bind(window.month_start)
        .fetch_one(&mut *tx)
        .await?;

        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        let low_stock_products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price_cents, stock, min_stock, created_at, updated_at
            FROM products
            WHERE stock <= min_stock
            ORDER BY stock ASC, name ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let recent_sales = sqlx::query_as::<_, SaleWithProduct>(
            r#"
            SELECT
                s.id, s.product_id, s.quantity, s.unit_price_cents, s.total_price_cents,
                s.customer_name, s.date,
                p.name AS product_name
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            ORDER BY s.date DESC, s.rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(RECENT_SALES_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            today_cents,
            month_cents,
            total_products,
            low_stock = low_stock_products.len(),
            "Computed dashboard stats"
        );

        Ok(DashboardStats {
            today_sales: Money::from_cents(today_cents),
            month_sales: Money::from_cents(month_cents),
            total_products,
            low_stock_products,
            recent_sales,
        })
    }
}
