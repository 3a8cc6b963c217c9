//! # Domain Types
//!
//! Core domain types for the inventory manager.
//!
//! Identity is the store's `INTEGER PRIMARY KEY` rowid; products additionally
//! carry an optional, unique, human-facing SKU. Prices are stored as raw
//! `REAL` values - two-decimal rendering is a display concern only, see
//! [`format_price`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation;
use crate::DEFAULT_MIN_QUANTITY;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Stock Keeping Unit - optional business identifier, unique when present.
    pub sku: Option<String>,

    /// Display name. Required, never empty.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Unit price. Non-negative.
    pub price: f64,

    /// Units currently in stock. The sales ledger never lets this go
    /// negative; direct catalog updates do not clamp it.
    pub quantity: i64,

    /// Reorder threshold. A product with `quantity <= min_quantity` shows up
    /// in the low-stock report.
    pub min_quantity: i64,
}

impl Product {
    /// Whether this product belongs in the low-stock report.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// Input for creating or fully replacing a product.
///
/// The draft is what dialogs and CSV rows produce; the catalog assigns the
/// id. `validate()` runs before any insert or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub min_quantity: i64,
}

impl ProductDraft {
    /// Creates a draft with the given name and the field defaults the store
    /// schema uses (price 0, quantity 0, min_quantity 5).
    pub fn new(name: impl Into<String>) -> Self {
        ProductDraft {
            sku: None,
            name: name.into(),
            description: None,
            price: 0.0,
            quantity: 0,
            min_quantity: DEFAULT_MIN_QUANTITY,
        }
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn min_quantity(mut self, min_quantity: i64) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    /// Validates the draft against catalog rules.
    pub fn validate(&self) -> Result<(), crate::ValidationError> {
        validation::validate_product_name(&self.name)?;
        if let Some(sku) = self.normalized_sku() {
            validation::validate_sku(&sku)?;
        }
        validation::validate_price(self.price)?;
        validation::validate_non_negative("quantity", self.quantity)?;
        validation::validate_non_negative("min_quantity", self.min_quantity)?;
        Ok(())
    }

    /// Returns the SKU with surrounding whitespace stripped and empty values
    /// collapsed to `None`, so a blank dialog field never claims uniqueness.
    pub fn normalized_sku(&self) -> Option<String> {
        validation::normalize_sku(self.sku.as_deref())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale event. Append-only and immutable.
///
/// `product_id` is a non-owning reference: the product may be deleted later,
/// leaving this pointing at nothing. Reporting must treat that as a valid,
/// renderable state (blank product name), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    /// Units sold. Always positive.
    pub quantity: i64,
    /// `quantity × unit price` at the time of sale.
    pub total_price: f64,
    /// UTC timestamp of the sale.
    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// User Identity
// =============================================================================

/// The identity returned by a successful authentication.
///
/// The password hash never leaves the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Formats a price with two decimals for table display.
///
/// Exports write the raw value; only the UI rounds.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
