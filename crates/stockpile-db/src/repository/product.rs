//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Low-stock lookup for the dashboard
//!
//! Stock is never written here after creation. Every later change goes
//! through the sale or stock-movement ledger so it is recorded.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::generate_id;
use crate::error::{DbError, DbResult};
use stockpile_core::{NewProduct, Product, ProductChanges};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list().await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price_cents, stock, min_stock, created_at, updated_at
            FROM products
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price_cents, stock, min_stock, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product with its opening stock.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with generated id and timestamps
    /// * `Err(DbError::Domain(_))` - Input failed validation
    pub async fn insert(&self, input: NewProduct) -> DbResult<Product> {
        let input = input.validated()?;
        let now = Utc::now();

        let product = Product {
            id: generate_id(),
            name: input.name,
            category: input.category,
            price_cents: input.price.cents(),
            stock: input.stock,
            min_stock: input.min_stock,
            created_at: now,
            updated_at: now,
        };

        debug!(name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category, price_cents, stock, min_stock, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        info!(id = %product.id, name = %product.name, stock = product.stock, "Product created");
        Ok(product)
    }

    /// Updates name, category, price and minimum stock.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: &str, changes: ProductChanges) -> DbResult<Product> {
        let changes = changes.validated()?;
        debug!(id = %id, "Updating product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                price_cents = ?4,
                min_stock = ?5,
                updated_at = ?6
            WHERE id = ?1
            RETURNING id, name, category, price_cents, stock, min_stock, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.category)
        .bind(changes.price.cents())
        .bind(changes.min_stock)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - Sales or movements still
    ///   reference it; the ledgers are append-only so the product stays
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Products at or below their minimum stock, lowest stock first.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price_cents, stock, min_stock, created_at, updated_at
            FROM products
            WHERE stock <= min_stock
            ORDER BY stock ASC, name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use stockpile_core::{CoreError, Money, NewProduct, ProductChanges};

    fn new_product(name: &str, stock: i64, min_stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Energy Drink".to_string(),
            price: Money::from_cents(799),
            min_stock,
            stock,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let created = repo.insert(new_product("Red Bull 250ml", 24, 6)).await.unwrap();
        let loaded = repo.get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, "Red Bull 250ml");
        assert_eq!(loaded.stock, 24);
        assert_eq!(loaded.price_cents, 799);
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(new_product("Red Bull Zero", 0, 0)).await.unwrap();
        repo.insert(new_product("Red Bull 250ml", 0, 0)).await.unwrap();
        repo.insert(new_product("Red Bull Editions", 0, 0)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Red Bull 250ml", "Red Bull Editions", "Red Bull Zero"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_input() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().insert(new_product("  ", 0, 0)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let created = repo.insert(new_product("Red Bull 250ml", 24, 6)).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                ProductChanges {
                    name: "Red Bull 355ml".to_string(),
                    category: "Energy Drink".to_string(),
                    price: Money::from_cents(999),
                    min_stock: 10,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Red Bull 355ml");
        assert_eq!(updated.price_cents, 999);
        assert_eq!(updated.min_stock, 10);
        assert_eq!(updated.stock, 24);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .update(
                "00000000-0000-0000-0000-000000000000",
                ProductChanges {
                    name: "Ghost".to_string(),
                    category: "None".to_string(),
                    price: Money::zero(),
                    min_stock: 0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let created = repo.insert(new_product("Red Bull 250ml", 0, 0)).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&created.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_low_stock_matches_rule() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(new_product("At threshold", 5, 5)).await.unwrap();
        repo.insert(new_product("Below", 2, 5)).await.unwrap();
        repo.insert(new_product("Above", 6, 5)).await.unwrap();
        repo.insert(new_product("Empty, no minimum", 0, 0)).await.unwrap();

        let low = repo.low_stock().await.unwrap();
        let all = repo.list().await.unwrap();

        let expected: Vec<&str> = all
            .iter()
            .filter(|p| p.is_low_stock())
            .map(|p| p.name.as_str())
            .collect();
        let mut names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Empty, no minimum", "Below", "At threshold"]);

        names.sort();
        let mut expected = expected;
        expected.sort();
        assert_eq!(names, expected);
    }
}
