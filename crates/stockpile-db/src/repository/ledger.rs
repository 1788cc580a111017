//! # Ledger Transactions
//!
//! The stock-adjustment step shared by sales and stock movements.
//!
//! ## Transaction Layout
//! ```text
//! BEGIN (deferred)
//!   │
//!   ├── 1. UPDATE products SET stock = stock + Δ
//!   │        WHERE id = ? AND stock + Δ >= 0        ← takes the write lock
//!   │
//!   │      0 rows? ── SELECT product ── none   → ProductNotFound
//!   │                                 └─ found  → InsufficientStock
//!   │                 (return Err, tx dropped → ROLLBACK)
//!   │
//!   ├── 2. SELECT product                         ← price/name snapshot
//!   ├── 3. INSERT ledger row(s)                   ← caller
//!   │
//! COMMIT
//! ```
//!
//! The write is the first statement, so the stock check and the stock write
//! happen under the same SQLite write lock. A concurrent writer waits on the
//! busy timeout instead of reading a stale level.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockpile_core::stock::StockAdjustment;
use stockpile_core::{CoreError, Product, StockMovement};

/// Applies `adjustment` inside `tx` and returns the product as it is after
/// the update.
///
/// On error nothing has been written; dropping `tx` rolls it back.
pub(crate) async fn adjust_stock(
    tx: &mut Transaction<'_, Sqlite>,
    adjustment: &StockAdjustment,
    now: DateTime<Utc>,
) -> DbResult<Product> {
    debug!(
        product_id = %adjustment.product_id(),
        delta = adjustment.delta(),
        "Adjusting stock"
    );

    let result = sqlx::query(
        r#"
        UPDATE products
        SET
            stock = stock + ?1,
            updated_at = ?2
        WHERE id = ?3 AND stock + ?1 >= 0
        "#,
    )
    .bind(adjustment.delta())
    .bind(now)
    .bind(adjustment.product_id())
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        let current = fetch_product(tx, adjustment.product_id()).await?;
        return Err(match current {
            None => CoreError::ProductNotFound(adjustment.product_id().to_string()).into(),
            Some(product) => match adjustment.check(&product) {
                Err(err) => err.into(),
                // The guard and the rule disagree; only possible on overflow.
                Ok(_) => DbError::Internal(format!(
                    "stock update for {} was not applied",
                    product.id
                )),
            },
        });
    }

    fetch_product(tx, adjustment.product_id())
        .await?
        .ok_or_else(|| DbError::not_found("Product", adjustment.product_id()))
}

async fn fetch_product(
    tx: &mut Transaction<'_, Sqlite>,
    id: &str,
) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, category, price_cents, stock, min_stock, created_at, updated_at
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(product)
}

/// Appends a row to the stock movement ledger.
pub(crate) async fn insert_movement(
    tx: &mut Transaction<'_, Sqlite>,
    movement: &StockMovement,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO stock_movements (id, product_id, movement_type, quantity, reason, date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&movement.id)
    .bind(&movement.product_id)
    .bind(movement.movement_type)
    .bind(movement.quantity)
    .bind(&movement.reason)
    .bind(movement.date)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
