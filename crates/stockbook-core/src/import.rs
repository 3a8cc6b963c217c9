//! # Import Coercion
//!
//! Best-effort field coercion for CSV import rows.
//!
//! The bulk loader is deliberately forgiving: an absent or empty numeric
//! field falls back to the schema default, while a non-empty value that is
//! not a number rejects the row (the caller skips it and records why).
//! Quantities accept decimal text and truncate, so "3.0" imports as 3.

use crate::error::{ValidationError, ValidationResult};
use crate::types::ProductDraft;
use crate::validation::normalize_sku;
use crate::DEFAULT_MIN_QUANTITY;

/// One raw CSV row after header mapping, before coercion.
///
/// All fields are optional strings; the transfer layer fills them from
/// whichever recognized columns the file actually has.
#[derive(Debug, Clone, Default)]
pub struct RawProductRow {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
    pub min_quantity: Option<String>,
}

impl RawProductRow {
    /// Coerces the raw row into a validated [`ProductDraft`].
    ///
    /// Fails when the name is missing/empty or a non-empty numeric field is
    /// unparseable; those rows are skipped by the importer.
    pub fn into_draft(self) -> ValidationResult<ProductDraft> {
        let name = self.name.as_deref().map(str::trim).unwrap_or("");
        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }

        let draft = ProductDraft {
            sku: normalize_sku(self.sku.as_deref()),
            name: name.to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            price: coerce_price(self.price.as_deref())?,
            quantity: coerce_quantity(self.quantity.as_deref())?,
            min_quantity: coerce_min_quantity(self.min_quantity.as_deref())?,
        };

        draft.validate()?;
        Ok(draft)
    }
}

/// Coerces a price field: absent/empty -> 0, otherwise parsed as a decimal.
pub fn coerce_price(raw: Option<&str>) -> ValidationResult<f64> {
    parse_decimal("price", raw, 0.0)
}

/// Coerces a quantity field: absent/empty -> 0, decimal text truncates.
pub fn coerce_quantity(raw: Option<&str>) -> ValidationResult<i64> {
    Ok(parse_decimal("quantity", raw, 0.0)? as i64)
}

/// Coerces a reorder threshold: absent/empty -> 5, decimal text truncates.
pub fn coerce_min_quantity(raw: Option<&str>) -> ValidationResult<i64> {
    Ok(parse_decimal("min_quantity", raw, DEFAULT_MIN_QUANTITY as f64)? as i64)
}

fn parse_decimal(field: &'static str, raw: Option<&str>, default: f64) -> ValidationResult<f64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<f64>().map_err(|_| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_numerics_take_defaults() {
        assert_eq!(coerce_price(None).unwrap(), 0.0);
        assert_eq!(coerce_price(Some("")).unwrap(), 0.0);
        assert_eq!(coerce_quantity(Some("  ")).unwrap(), 0);
        assert_eq!(coerce_min_quantity(None).unwrap(), 5);
    }

    #[test]
    fn decimal_quantities_truncate() {
        assert_eq!(coerce_quantity(Some("3.0")).unwrap(), 3);
        assert_eq!(coerce_quantity(Some("7.9")).unwrap(), 7);
        assert_eq!(coerce_min_quantity(Some("2.5")).unwrap(), 2);
    }

    #[test]
    fn garbage_numerics_reject_the_row() {
        assert!(coerce_price(Some("abc")).is_err());
        assert!(coerce_quantity(Some("many")).is_err());
    }

    #[test]
    fn row_without_name_is_rejected() {
        let row = RawProductRow {
            price: Some("1.50".to_string()),
            ..Default::default()
        };
        assert!(row.into_draft().is_err());
    }

    #[test]
    fn full_row_coerces() {
        let row = RawProductRow {
            sku: Some(" X001 ".to_string()),
            name: Some("USB Cable".to_string()),
            description: Some("".to_string()),
            price: Some("4.99".to_string()),
            quantity: Some("12".to_string()),
            min_quantity: None,
        };

        let draft = row.into_draft().unwrap();
        assert_eq!(draft.sku, Some("X001".to_string()));
        assert_eq!(draft.name, "USB Cable");
        assert_eq!(draft.description, None);
        assert_eq!(draft.price, 4.99);
        assert_eq!(draft.quantity, 12);
        assert_eq!(draft.min_quantity, 5);
    }
}
