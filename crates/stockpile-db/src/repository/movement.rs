//! # Stock Movement Repository
//!
//! Database operations for the stock movement ledger.
//!
//! Inbound movements always succeed for an existing product. Outbound
//! movements fail with `InsufficientStock` when they would take stock below
//! zero, and then leave no trace.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::generate_id;
use super::ledger;
use crate::error::DbResult;
use stockpile_core::stock::StockAdjustment;
use stockpile_core::{NewStockMovement, StockMovement, StockMovementWithProduct};

/// Repository for stock movement database operations.
#[derive(Debug, Clone)]
pub struct StockMovementRepository {
    pool: SqlitePool,
}

impl StockMovementRepository {
    /// Creates a new StockMovementRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockMovementRepository { pool }
    }

    /// Records a movement and applies it to the product's stock atomically.
    pub async fn create(&self, input: NewStockMovement) -> DbResult<StockMovement> {
        let input = input.validated()?;
        let adjustment = StockAdjustment::new(
            input.product_id.as_str(),
            input.movement_type.direction(),
            input.quantity,
        )?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let product = ledger::adjust_stock(&mut tx, &adjustment, now).await?;

        let movement = StockMovement {
            id: generate_id(),
            product_id: product.id.clone(),
            movement_type: input.movement_type,
            quantity: input.quantity,
            reason: input.reason,
            date: now,
        };
        ledger::insert_movement(&mut tx, &movement).await?;

        tx.commit().await?;

        info!(
            movement_id = %movement.id,
            product = %product.name,
            movement_type = %movement.movement_type,
            quantity = movement.quantity,
            stock_after = product.stock,
            "Stock movement recorded"
        );

        Ok(movement)
    }

    /// Lists all movements with product names, newest first.
    pub async fn list(&self) -> DbResult<Vec<StockMovementWithProduct>> {
        let movements = sqlx::query_as::<_, StockMovementWithProduct>(
            r#"
            SELECT
                m.id, m.product_id, m.movement_type, m.quantity, m.reason, m.date,
                p.name AS product_name
            FROM stock_movements m
            INNER JOIN products p ON p.id = m.product_id
            ORDER BY m.date DESC, m.rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = movements.len(), "Listed stock movements");
        Ok(movements)
    }

    /// One product's movements in the order they were applied.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<StockMovement>> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, product_id, movement_type, quantity, reason, date
            FROM stock_movements
            WHERE product_id = ?1
            ORDER BY date ASC, rowid ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }
}

// =============================================================================
// Tests
// =============================================================================
