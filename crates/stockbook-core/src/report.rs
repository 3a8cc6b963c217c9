//! # Sales Aggregation
//!
//! Pure grouping of the sales ledger into per-day revenue totals. The
//! database layer fetches the ledger; the math lives here where it can be
//! tested without a store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Sale;

/// Total revenue for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesTotal {
    pub day: NaiveDate,
    pub total: f64,
}

/// Groups sales by the UTC calendar day of `sold_at` and sums `total_price`.
///
/// Output is sorted ascending by day. Days with no sales are absent - the
/// chart consumer decides whether to zero-fill.
pub fn daily_sales_totals(sales: &[Sale]) -> Vec<DailySalesTotal> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for sale in sales {
        *by_day.entry(sale.sold_at.date_naive()).or_insert(0.0) += sale.total_price;
    }

    by_day
        .into_iter()
        .map(|(day, total)| DailySalesTotal { day, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sale(id: i64, total_price: f64, y: i32, m: u32, d: u32, hour: u32) -> Sale {
        Sale {
            id,
            product_id: 1,
            quantity: 1,
            total_price,
            sold_at: Utc.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_ledger_yields_no_entries() {
        assert!(daily_sales_totals(&[]).is_empty());
    }

    #[test]
    fn same_day_sales_merge() {
        let sales = vec![sale(1, 10.0, 2026, 8, 1, 9), sale(2, 15.0, 2026, 8, 1, 17)];
        let totals = daily_sales_totals(&sales);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].day, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert!((totals[0].total - 25.0).abs() < 1e-9);
    }

    #[test]
    fn different_days_sorted_ascending() {
        // Deliberately out of order.
        let sales = vec![
            sale(1, 5.0, 2026, 8, 3, 12),
            sale(2, 7.0, 2026, 8, 1, 12),
            sale(3, 2.0, 2026, 8, 2, 12),
        ];
        let totals = daily_sales_totals(&sales);

        let days: Vec<NaiveDate> = totals.iter().map(|t| t.day).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn grouping_uses_utc_day() {
        // 23:59 and 00:01 UTC land on different days even though they are
        // two minutes apart.
        let sales = vec![
            Sale {
                id: 1,
                product_id: 1,
                quantity: 1,
                total_price: 1.0,
                sold_at: Utc.with_ymd_and_hms(2026, 8, 1, 23, 59, 0).unwrap(),
            },
            Sale {
                id: 2,
                product_id: 1,
                quantity: 1,
                total_price: 1.0,
                sold_at: Utc.with_ymd_and_hms(2026, 8, 2, 0, 1, 0).unwrap(),
            },
        ];
        assert_eq!(daily_sales_totals(&sales).len(), 2);
    }
}
