//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! Stockbook is a single-user local inventory manager. This crate holds the
//! pure half of it: domain types, input validation, the credential digest,
//! CSV field coercion, and sales aggregation. Nothing in here performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Presentation layer (table UI, dialogs, chart)            │
//! │       │ commands: login / add / sell / restock / export   │
//! │       ▼                                                   │
//! │  stockbook-db  ── SQLite pool, repositories, CSV transfer │
//! │       │                                                   │
//! │       ▼                                                   │
//! │  stockbook-core (THIS CRATE)                              │
//! │    types · validation · password · import · report        │
//! │    NO I/O · NO DATABASE · PURE FUNCTIONS                  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, UserIdentity, drafts)
//! - [`error`] - Validation error type
//! - [`validation`] - Business rule validation
//! - [`password`] - Credential hashing and the bootstrap admin seed
//! - [`import`] - Best-effort numeric coercion for CSV import rows
//! - [`report`] - Daily sales aggregation

pub mod error;
pub mod import;
pub mod password;
pub mod report;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use password::AdminSeed;
pub use report::DailySalesTotal;
pub use types::{format_price, Product, ProductDraft, Sale, UserIdentity};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default reorder threshold for products created without one.
///
/// A product is "low stock" once `quantity <= min_quantity`.
pub const DEFAULT_MIN_QUANTITY: i64 = 5;

/// Maximum length accepted for a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length accepted for a SKU.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum length accepted for a username.
pub const MAX_USERNAME_LEN: usize = 50;
