//! # Sale Repository
//!
//! Database operations for the sale ledger.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Register a Sale                                   │
//! │                                                                         │
//! │  NewSale { product_id, quantity: 3, customer_name }                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate → StockAdjustment(Decrement, 3)                              │
//! │       │                                                                 │
//! │       ▼  ── one transaction ───────────────────────────────────────    │
//! │  ledger::adjust_stock      stock 10 → 7 (or InsufficientStock)         │
//! │  INSERT sales              unit price frozen, total = price × 3        │
//! │  INSERT stock_movements    outbound 3, reason "Sale"                   │
//! │       │  ────────────────────────────────────────────────────────────  │
//! │       ▼                                                                 │
//! │  COMMIT → Sale                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::generate_id;
use super::ledger;
use crate::error::DbResult;
use stockpile_core::stock::{Direction, StockAdjustment};
use stockpile_core::{MovementType, NewSale, Sale, SaleWithProduct, StockMovement, ValidationError};

/// Reason recorded on the stock movement that accompanies every sale.
pub const SALE_MOVEMENT_REASON: &str = "Sale";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Registers a sale: decrements stock and appends the sale plus its
    /// outbound movement, all in one transaction.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The recorded sale
    /// * `Err(DbError::Domain(ProductNotFound))` - Unknown product
    /// * `Err(DbError::Domain(InsufficientStock))` - Not enough stock; nothing written
    pub async fn create(&self, input: NewSale) -> DbResult<Sale> {
        let input = input.validated()?;
        let adjustment =
            StockAdjustment::new(input.product_id.as_str(), Direction::Decrement, input.quantity)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let product = ledger::adjust_stock(&mut tx, &adjustment, now).await?;

        let unit_price = product.price();
        let total_price = unit_price
            .checked_multiply_quantity(input.quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::MAX / unit_price.cents().max(1),
            })?;

        let sale = Sale {
            id: generate_id(),
            product_id: product.id.clone(),
            quantity: input.quantity,
            unit_price_cents: unit_price.cents(),
            total_price_cents: total_price.cents(),
            customer_name: input.customer_name,
            date: now,
        };

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, quantity, unit_price_cents, total_price_cents, customer_name, date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(sale.quantity)
        .bind(sale.unit_price_cents)
        .bind(sale.total_price_cents)
        .bind(&sale.customer_name)
        .bind(sale.date)
        .execute(&mut *tx)
        .await?;

        let movement = StockMovement {
            id: generate_id(),
            product_id: product.id.clone(),
            movement_type: MovementType::Outbound,
            quantity: sale.quantity,
            reason: SALE_MOVEMENT_REASON.to_string(),
            date: now,
        };
        ledger::insert_movement(&mut tx, &movement).await?;

        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            product = %product.name,
            quantity = sale.quantity,
            total = %total_price,
            stock_after = product.stock,
            "Sale registered"
        );

        Ok(sale)
    }

    /// Lists all sales with product names, newest first.
    pub async fn list(&self) -> DbResult<Vec<SaleWithProduct>> {
        let sales = sqlx::query_as::<_, SaleWithProduct>(
            r#"
            SELECT
                s.id, s.product_id, s.quantity, s.unit_price_cents, s.total_price_cents,
                s.customer_name, s.date,
                p.name AS product_name
            FROM sales s
            INNER JOIN products p ON p.id = s.product_id
            ORDER BY s.date DESC, s.rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }

    /// Gets a sale by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, unit_price_cents, total_price_cents, customer_name, date
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Counts sales for one product.
    pub async fn count_for_product(&self, product_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = ?1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Tests
// =============================================================================
