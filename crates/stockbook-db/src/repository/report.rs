//! # Report Repository
//!
//! Read-only aggregates over catalog and ledger. The low-stock listing is a
//! single query; daily totals fetch the ledger and hand the grouping to the
//! pure aggregation in `stockbook-core` so the math stays testable without a
//! store.

use sqlx::SqlitePool;
use tracing::debug;

use stockbook_core::report::{daily_sales_totals, DailySalesTotal};
use stockbook_core::Product;

use crate::error::DbResult;

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Products at or below their reorder threshold, least stock first.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let products: Vec<Product> = sqlx::query_as(
            "SELECT id, sku, name, description, price, quantity, min_quantity \
             FROM products WHERE quantity <= min_quantity ORDER BY quantity",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "low stock report");
        Ok(products)
    }

    /// Revenue per UTC calendar day, ascending. Days without sales are
    /// absent - the chart consumer decides whether to zero-fill.
    pub async fn daily_sales_totals(&self) -> DbResult<Vec<DailySalesTotal>> {
        let sales: Vec<stockbook_core::Sale> = sqlx::query_as(
            "SELECT id, product_id, quantity, total_price, sold_at \
             FROM sales ORDER BY sold_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(daily_sales_totals(&sales))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
