//! # Sale Repository
//!
//! The append-only sales ledger. `record_sale` is the one multi-step
//! operation in the system and the only place the stock invariant is
//! enforced:
//!
//! ```text
//! BEGIN
//!   load product            ── absent?        → NotFound, rollback
//!   check requested stock   ── too many?      → InsufficientStock, rollback
//!   INSERT sale row         ── quantity × price, UTC timestamp
//!   UPDATE stock (−qty)
//! COMMIT
//! ```
//!
//! A crash or a concurrent reader can never observe the sale row without the
//! decrement (or vice versa), and quantity can never go negative through
//! this path.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use stockbook_core::validation::validate_sale_quantity;
use stockbook_core::{Product, Sale};

use crate::error::{DbError, DbResult};

/// Repository for sales ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale of `quantity` units and decrements stock, atomically.
    ///
    /// ## Errors
    /// * `Validation` - quantity is zero or negative
    /// * `NotFound` - no product with this id
    /// * `InsufficientStock` - requested more than is on hand; stock is left
    ///   untouched
    pub async fn record_sale(&self, product_id: i64, quantity: i64) -> DbResult<Sale> {
        validate_sale_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;

        let product: Option<Product> = sqlx::query_as(
            "SELECT id, sku, name, description, price, quantity, min_quantity \
             FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let product = product.ok_or(DbError::not_found("product", product_id))?;

        if quantity > product.quantity {
            // Dropping the transaction rolls it back.
            return Err(DbError::InsufficientStock {
                product_id,
                available: product.quantity,
                requested: quantity,
            });
        }

        let total_price = quantity as f64 * product.price;
        let sold_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO sales (product_id, quantity, total_price, sold_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(product_id)
        .bind(quantity)
        .bind(total_price)
        .bind(sold_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET quantity = quantity - ?2 WHERE id = ?1")
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(product_id = %product_id, quantity = %quantity, total = %total_price, "sale recorded");

        Ok(Sale {
            id: result.last_insert_rowid(),
            product_id,
            quantity,
            total_price,
            sold_at,
        })
    }

    /// Adds `quantity` units of stock.
    ///
    /// No sign validation and no existence check by contract: callers own
    /// the meaning of the delta, and a missing product id is a silent no-op,
    /// the same as `delete`.
    pub async fn restock(&self, product_id: i64, quantity: i64) -> DbResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "restocking");

        let result = sqlx::query("UPDATE products SET quantity = quantity + ?2 WHERE id = ?1")
            .bind(product_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(product_id = %product_id, "restock matched no product");
        }

        Ok(())
    }

    /// Returns the full ledger ordered by sale time ascending.
    ///
    /// Feeds the daily-totals report and the sales export.
    pub async fn list_chronological(&self) -> DbResult<Vec<Sale>> {
        let sales: Vec<Sale> = sqlx::query_as(
            "SELECT id, product_id, quantity, total_price, sold_at \
             FROM sales ORDER BY sold_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use stockbook_core::ProductDraft;

    use super::*;

    async fn db_with_product(quantity: i64, price: f64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db
            .products()
            .create(
                &ProductDraft::new("Widget")
                    .sku("W-1")
                    .price(price)
                    .quantity(quantity),
            )
            .await
            .unwrap();
        (db, product.id)
    }

    #[tokio::test]
    async fn sale_decrements_stock_and_snapshots_price() {
        let (db, id) = db_with_product(10, 2.5).await;

        let sale = db.sales().record_sale(id, 4).await.unwrap();
        assert_eq!(sale.product_id, id);
        assert_eq!(sale.quantity, 4);
        assert!((sale.total_price - 10.0).abs() < 1e-9);

        let product = db.products().get(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 6);
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_quantity_unchanged() {
        let (db, id) = db_with_product(5, 1.0).await;

        let err = db.sales().record_sale(id, 6).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));

        // Rolled back: no sale row, stock still 5.
        assert_eq!(db.products().get(id).await.unwrap().unwrap().quantity, 5);
        assert!(db.sales().list_chronological().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn selling_exactly_the_remaining_stock_is_allowed() {
        let (db, id) = db_with_product(5, 1.0).await;

        db.sales().record_sale(id, 5).await.unwrap();
        assert_eq!(db.products().get(id).await.unwrap().unwrap().quantity, 0);

        // And one more unit is rejected.
        assert!(matches!(
            db.sales().record_sale(id, 1).await.unwrap_err(),
            DbError::InsufficientStock { .. }
        ));
    }

    #[tokio::test]
    async fn stock_is_conserved_across_a_sequence_of_sales() {
        let (db, id) = db_with_product(20, 3.0).await;

        let sold = [5, 1, 4, 2];
        for qty in sold {
            db.sales().record_sale(id, qty).await.unwrap();
        }

        let product = db.products().get(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 20 - sold.iter().sum::<i64>());
        assert_eq!(db.sales().list_chronological().await.unwrap().len(), sold.len());
    }

    #[tokio::test]
    async fn sale_on_missing_product_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.sales().record_sale(404, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_positive_quantity_rejected_before_any_query() {
        let (db, id) = db_with_product(5, 1.0).await;

        assert!(matches!(
            db.sales().record_sale(id, 0).await.unwrap_err(),
            DbError::Validation(_)
        ));
        assert!(matches!(
            db.sales().record_sale(id, -2).await.unwrap_err(),
            DbError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn restock_increments_stock() {
        let (db, id) = db_with_product(2, 1.0).await;

        db.sales().restock(id, 8).await.unwrap();
        assert_eq!(db.products().get(id).await.unwrap().unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn restock_missing_product_is_a_silent_no_op() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.sales().restock(404, 5).await.unwrap();

        // Nothing was created or touched.
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
