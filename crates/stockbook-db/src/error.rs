//! # Database Error Types
//!
//! Every store operation surfaces one of these; the presentation layer turns
//! them into operator-facing messages. The `From<sqlx::Error>` impl
//! categorizes SQLite constraint failures by parsing the constraint message,
//! and repositories refine `UniqueViolation` into the domain-specific
//! duplicate variants where they know the offending value.

use stockbook_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found for the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A product with this SKU already exists.
    #[error("SKU '{sku}' already exists")]
    DuplicateSku { sku: String },

    /// A user with this username already exists.
    #[error("username '{username}' already exists")]
    DuplicateUsername { username: String },

    /// The sale asks for more units than are in stock. The transaction is
    /// rolled back and stock is unchanged.
    #[error("insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// A UNIQUE index rejected the write and no repository refined it.
    #[error("duplicate value for {column}")]
    UniqueViolation { column: String },

    /// Input rejected before any query ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// CSV read or write failure during bulk transfer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Database connection failed. Not recoverable at the call site.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed at startup.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Anything else from the driver.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }

    /// Whether this error is a UNIQUE violation on the given column, written
    /// as `table.column` the way SQLite reports it.
    pub(crate) fn is_unique_on(&self, column: &str) -> bool {
        matches!(self, DbError::UniqueViolation { column: c } if c == column)
    }
}

/// Convert sqlx errors to DbError.
///
/// SQLite reports constraint failures as
/// `UNIQUE constraint failed: <table>.<column>`; the column is preserved so
/// repositories can map the violation onto `DuplicateSku` or
/// `DuplicateUsername` with the actual value in hand.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                if let Some(column) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        column: column.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DbError::ConnectionFailed(err.to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message() {
        let err = DbError::InsufficientStock {
            product_id: 7,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product 7: available 3, requested 5"
        );
    }

    #[test]
    fn unique_column_matching() {
        let err = DbError::UniqueViolation {
            column: "products.sku".to_string(),
        };
        assert!(err.is_unique_on("products.sku"));
        assert!(!err.is_unique_on("users.username"));
    }
}
