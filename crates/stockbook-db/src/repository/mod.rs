//! # Repository Module
//!
//! One repository per store component, all sharing the pool:
//!
//! - [`user::UserRepository`] - credential store (register, authenticate)
//! - [`product::ProductRepository`] - product catalog CRUD and search
//! - [`sale::SaleRepository`] - sales ledger (record_sale, restock)
//! - [`report::ReportRepository`] - low stock and daily sales totals
//!
//! Repositories keep the SQL in one place; callers see domain types and
//! [`crate::DbError`] values only.

pub mod product;
pub mod report;
pub mod sale;
pub mod user;
