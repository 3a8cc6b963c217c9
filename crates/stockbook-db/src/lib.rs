//! # stockbook-db: Database Layer for Stockbook
//!
//! SQLite access for the inventory manager, built on sqlx. The [`Database`]
//! handle is the single-owner service object the presentation layer talks
//! to; every store operation hangs off one of its repositories.
//!
//! ```text
//! Database (pool.rs)
//! ├── users()      UserRepository      register / authenticate
//! ├── products()   ProductRepository   create / update / delete / list
//! ├── sales()      SaleRepository      record_sale / restock
//! ├── reports()    ReportRepository    low_stock / daily_sales_totals
//! └── transfer     CSV import/export over the above
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./inventory.db")).await?;
//! let products = db.products().list(Some("cable")).await?;
//! let sale = db.sales().record_sale(products[0].id, 2).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod transfer;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
pub use repository::user::UserRepository;

pub use transfer::{export_products, export_sales, import_products, ImportOutcome, SkippedRow};
