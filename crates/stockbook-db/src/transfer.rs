//! # Bulk Transfer
//!
//! CSV import/export over generic readers and writers. File dialogs and
//! paths are the presentation layer's business; this module only ever sees
//! an `io::Read` or `io::Write`.
//!
//! Import is best-effort by contract: a row that cannot be parsed or stored
//! is skipped, the load continues, and the outcome reports both the count
//! and the reason for every skip. Export writes raw stored values - price
//! rounding is a display concern, never a persistence one.

use std::io::{Read, Write};

use serde::Serialize;
use sqlx::FromRow;
use tracing::{debug, info};

use stockbook_core::import::RawProductRow;

use crate::error::DbResult;
use crate::pool::Database;

// =============================================================================
// Import Outcome
// =============================================================================

/// A row the importer refused, with its 1-based line number and the reason.
///
/// A record whose quoted fields span several lines reports the line it
/// starts on.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Result of a best-effort bulk load.
///
/// The externally visible contract is `imported`; `skipped` exists so a
/// caller that cares can say why the other rows went missing instead of
/// silently swallowing them. Serializable so a presentation layer can hand
/// the whole outcome to its dialog as-is.
#[derive(Debug, Default, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

// =============================================================================
// Export
// =============================================================================

/// Writes the whole catalog as CSV, in `list(None)` order (name ascending).
///
/// Header: `id,sku,name,description,price,quantity,min_quantity`. Absent
/// SKU/description become empty fields; prices are raw values.
///
/// Returns the number of data rows written.
pub async fn export_products<W: Write>(db: &Database, sink: W) -> DbResult<usize> {
    let products = db.products().list(None).await?;

    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record([
        "id",
        "sku",
        "name",
        "description",
        "price",
        "quantity",
        "min_quantity",
    ])?;

    for p in &products {
        writer.write_record([
            p.id.to_string(),
            p.sku.clone().unwrap_or_default(),
            p.name.clone(),
            p.description.clone().unwrap_or_default(),
            p.price.to_string(),
            p.quantity.to_string(),
            p.min_quantity.to_string(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;

    debug!(rows = products.len(), "exported products");
    Ok(products.len())
}

/// One exported ledger row: the sale joined to its product's current name.
#[derive(Debug, FromRow)]
struct SaleExportRow {
    id: i64,
    /// `None` when the product was deleted after the sale - rendered as an
    /// empty field, by design.
    product: Option<String>,
    quantity: i64,
    total_price: f64,
    sold_at: String,
}

/// Writes the whole ledger as CSV, ordered by sale time ascending.
///
/// Header: `id,product,quantity,total_price,sold_at`. Sales whose product
/// has since been deleted keep their row with an empty product name.
///
/// Returns the number of data rows written.
pub async fn export_sales<W: Write>(db: &Database, sink: W) -> DbResult<usize> {
    let rows: Vec<SaleExportRow> = sqlx::query_as(
        "SELECT s.id, p.name AS product, s.quantity, s.total_price, s.sold_at \
         FROM sales s LEFT JOIN products p ON p.id = s.product_id \
         ORDER BY s.sold_at, s.id",
    )
    .fetch_all(db.pool())
    .await?;

    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(["id", "product", "quantity", "total_price", "sold_at"])?;

    for r in &rows {
        writer.write_record([
            r.id.to_string(),
            r.product.clone().unwrap_or_default(),
            r.quantity.to_string(),
            r.total_price.to_string(),
            r.sold_at.clone(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;

    debug!(rows = rows.len(), "exported sales");
    Ok(rows.len())
}

// =============================================================================
// Import
// =============================================================================

/// Recognized import columns. `id` columns are ignored: the store assigns
/// fresh identifiers.
const SKU_HEADERS: &[&str] = &["sku", "SKU"];
const MIN_QUANTITY_HEADERS: &[&str] = &["min_quantity", "min"];

/// Loads products from header-driven CSV, best effort.
///
/// Recognized columns: `sku|SKU, name, description, price, quantity,
/// min_quantity|min`, in any order; unrecognized columns are ignored.
/// Rows with an empty name, unparseable non-empty numerics, or store errors
/// (duplicate SKU) are skipped with a recorded reason.
pub async fn import_products<R: Read>(db: &Database, source: R) -> DbResult<ImportOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let sku_idx = find_column(&headers, SKU_HEADERS);
    let name_idx = find_column(&headers, &["name"]);
    let description_idx = find_column(&headers, &["description"]);
    let price_idx = find_column(&headers, &["price"]);
    let quantity_idx = find_column(&headers, &["quantity"]);
    let min_quantity_idx = find_column(&headers, MIN_QUANTITY_HEADERS);

    let mut outcome = ImportOutcome::default();

    for record in reader.records() {
        // The parser tracks real file lines, so quoted fields spanning
        // several lines don't skew the diagnostics.
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                outcome.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw = RawProductRow {
            sku: field(&record, sku_idx),
            name: field(&record, name_idx),
            description: field(&record, description_idx),
            price: field(&record, price_idx),
            quantity: field(&record, quantity_idx),
            min_quantity: field(&record, min_quantity_idx),
        };

        let draft = match raw.into_draft() {
            Ok(draft) => draft,
            Err(e) => {
                outcome.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match db.products().create(&draft).await {
            Ok(_) => outcome.imported += 1,
            Err(e) => outcome.skipped.push(SkippedRow {
                line,
                reason: e.to_string(),
            }),
        }
    }

    info!(
        imported = outcome.imported,
        skipped = outcome.skipped.len(),
        "product import finished"
    );
    Ok(outcome)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.trim()))
}

fn field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i)).map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================
