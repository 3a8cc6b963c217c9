//! # Validation Module
//!
//! Input validation for catalog and credential operations.
//!
//! Validation runs in two layers: these checks reject malformed input before
//! any query is issued, and the SQLite schema (NOT NULL, UNIQUE) backstops
//! whatever slips through. Quantity invariants are NOT enforced here - only
//! the sales ledger guards against negative stock, by design.

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_NAME_LEN, MAX_SKU_LEN, MAX_USERNAME_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: required, at most [`MAX_NAME_LEN`] characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a SKU that has already been normalized (non-empty).
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku",
            max: MAX_SKU_LEN,
        });
    }

    Ok(())
}

/// Collapses a blank or whitespace-only SKU to `None`.
///
/// A product without a SKU never participates in uniqueness checks, so an
/// empty dialog field must not be stored as an empty string.
pub fn normalize_sku(sku: Option<&str>) -> Option<String> {
    match sku {
        Some(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        None => None,
    }
}

/// Validates a username: required, at most [`MAX_USERNAME_LEN`] characters.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username",
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(())
}

/// Validates a password: required, no further policy for a local tool.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price: finite and non-negative. Zero is allowed.
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::Negative { field: "price" });
    }

    Ok(())
}

/// Validates that a counter-like field is not negative.
pub fn validate_non_negative(field: &'static str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative { field });
    }

    Ok(())
}

/// Validates a sale quantity: strictly positive.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    Ok(())
}
