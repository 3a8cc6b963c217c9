//! # Error Types
//!
//! Validation errors for stockbook-core.
//!
//! Storage-level errors (not-found, duplicate SKU, insufficient stock) live
//! in the `stockbook-db` crate next to the code that produces them; this
//! crate only rejects malformed input. Every variant maps to a message the
//! presentation layer can show as-is.

use thiserror::Error;

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic or database access runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is negative where a non-negative one is required.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// A field that should hold a number could not be parsed as one.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
