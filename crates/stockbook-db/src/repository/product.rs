//! # Product Repository
//!
//! Catalog CRUD and search.
//!
//! Every read re-queries the store; there is no in-memory cache to
//! invalidate. Search is a `LIKE` substring match over name and SKU - for a
//! catalog a single operator maintains by hand that beats carrying a
//! full-text index.

use sqlx::SqlitePool;
use tracing::debug;

use stockbook_core::{Product, ProductDraft};

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = "id, sku, name, description, price, quantity, min_quantity";

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product from a draft.
    ///
    /// ## Errors
    /// * `Validation` - empty name, negative price/quantity/threshold
    /// * `DuplicateSku` - the (normalized) SKU is already in use; a product
    ///   without a SKU never collides
    pub async fn create(&self, draft: &ProductDraft) -> DbResult<Product> {
        draft.validate()?;
        let sku = draft.normalized_sku();

        debug!(name = %draft.name, sku = ?sku, "inserting product");

        let result = sqlx::query(
            "INSERT INTO products (sku, name, description, price, quantity, min_quantity) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&sku)
        .bind(draft.name.trim())
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.min_quantity)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)
        .map_err(|e| Self::refine_duplicate(e, sku.as_deref()))?;

        Ok(Product {
            id: result.last_insert_rowid(),
            sku,
            name: draft.name.trim().to_string(),
            description: draft.description.clone(),
            price: draft.price,
            quantity: draft.quantity,
            min_quantity: draft.min_quantity,
        })
    }

    /// Replaces every mutable field of an existing product.
    ///
    /// ## Errors
    /// * `NotFound` - the id does not exist
    /// * `DuplicateSku` - the new SKU belongs to another product
    pub async fn update(&self, id: i64, draft: &ProductDraft) -> DbResult<()> {
        draft.validate()?;
        let sku = draft.normalized_sku();

        debug!(id = %id, "updating product");

        let result = sqlx::query(
            "UPDATE products SET sku = ?2, name = ?3, description = ?4, price = ?5, \
             quantity = ?6, min_quantity = ?7 WHERE id = ?1",
        )
        .bind(id)
        .bind(&sku)
        .bind(draft.name.trim())
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.min_quantity)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)
        .map_err(|e| Self::refine_duplicate(e, sku.as_deref()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("product", id));
        }

        Ok(())
    }

    /// Deletes a product unconditionally.
    ///
    /// Deleting an id that does not exist succeeds; deleting a product with
    /// recorded sales leaves those sales dangling - that is the documented
    /// contract, not an oversight.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "deleting product");

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches a product by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products sorted by name ascending, optionally filtered by a
    /// substring match on name or SKU.
    pub async fn list(&self, search: Option<&str>) -> DbResult<Vec<Product>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let products: Vec<Product> = match search {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products \
                     WHERE name LIKE ?1 OR sku LIKE ?1 ORDER BY name"
                ))
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    /// Counts catalog entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn refine_duplicate(err: DbError, sku: Option<&str>) -> DbError {
        if err.is_unique_on("products.sku") {
            DbError::DuplicateSku {
                sku: sku.unwrap_or_default().to_string(),
            }
        } else {
            err
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    use super::*;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let db = test_db().await;

        let created = db
            .products()
            .create(
                &ProductDraft::new("USB Cable")
                    .sku("X001")
                    .description("1m, braided")
                    .price(4.99)
                    .quantity(20)
                    .min_quantity(3),
            )
            .await
            .unwrap();

        let fetched = db.products().get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.sku.as_deref(), Some("X001"));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.products().get(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_sku_rejected_absent_sku_never_collides() {
        let db = test_db().await;
        let products = db.products();

        products
            .create(&ProductDraft::new("First").sku("X001"))
            .await
            .unwrap();

        let err = products
            .create(&ProductDraft::new("Second").sku("X001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateSku { sku } if sku == "X001"));

        // No SKU, any number of times.
        products.create(&ProductDraft::new("Third")).await.unwrap();
        products.create(&ProductDraft::new("Fourth")).await.unwrap();
        assert_eq!(products.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn list_sorts_by_name() {
        let db = test_db().await;
        let products = db.products();

        products.create(&ProductDraft::new("Zip Ties")).await.unwrap();
        products.create(&ProductDraft::new("Adapter")).await.unwrap();
        products.create(&ProductDraft::new("Mouse")).await.unwrap();

        let names: Vec<String> = products
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Adapter", "Mouse", "Zip Ties"]);
    }

    #[tokio::test]
    async fn search_matches_name_or_sku() {
        let db = test_db().await;
        let products = db.products();

        products
            .create(&ProductDraft::new("USB Cable").sku("CAB-01"))
            .await
            .unwrap();
        products
            .create(&ProductDraft::new("HDMI Cable").sku("CAB-02"))
            .await
            .unwrap();
        products
            .create(&ProductDraft::new("Mouse").sku("MOU-01"))
            .await
            .unwrap();

        let by_name = products.list(Some("cable")).await.unwrap();
        assert_eq!(by_name.len(), 2);

        let by_sku = products.list(Some("MOU")).await.unwrap();
        assert_eq!(by_sku.len(), 1);
        assert_eq!(by_sku[0].name, "Mouse");

        let nothing = products.list(Some("zzz")).await.unwrap();
        assert!(nothing.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let db = test_db().await;
        let products = db.products();

        let created = products
            .create(&ProductDraft::new("Old Name").sku("X001").price(1.0))
            .await
            .unwrap();

        products
            .update(
                created.id,
                &ProductDraft::new("New Name").price(2.5).quantity(9),
            )
            .await
            .unwrap();

        let updated = products.get(created.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.sku, None); // full replace drops the SKU
        assert_eq!(updated.price, 2.5);
        assert_eq!(updated.quantity, 9);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let db = test_db().await;
        let err = db
            .products()
            .update(42, &ProductDraft::new("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_to_taken_sku_is_duplicate() {
        let db = test_db().await;
        let products = db.products();

        products
            .create(&ProductDraft::new("First").sku("X001"))
            .await
            .unwrap();
        let second = products
            .create(&ProductDraft::new("Second").sku("X002"))
            .await
            .unwrap();

        let err = products
            .update(second.id, &ProductDraft::new("Second").sku("X001"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateSku { .. }));
    }

    #[tokio::test]
    async fn delete_is_unconditional() {
        let db = test_db().await;
        let products = db.products();

        let created = products.create(&ProductDraft::new("Gone Soon")).await.unwrap();
        products.delete(created.id).await.unwrap();
        assert!(products.get(created.id).await.unwrap().is_none());

        // Deleting a missing id is still Ok.
        products.delete(created.id).await.unwrap();
    }
}
