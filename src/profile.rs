//! Per-column dataset overview.
//!
//! A lightweight diagnostic companion to classification: null counts,
//! distinct counts, and the most frequent values for every column of a
//! [`Sheet`]. The CLI prints this for `--profile`.

use serde::Serialize;

use crate::classify::{top_values, ValueCount};
use crate::types::Sheet;

/// Overview of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    /// Header name.
    pub name: String,
    /// Total rows.
    pub rows: usize,
    /// Null/missing cells.
    pub nulls: usize,
    /// Nulls as a percentage of rows (0.0 for an empty sheet).
    pub null_pct: f64,
    /// Number of distinct non-null values.
    pub distinct: usize,
    /// Most frequent values (up to 5).
    pub top: Vec<ValueCount>,
}

/// Overview of a whole sheet, one entry per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetProfile {
    /// Source sheet name.
    pub sheet: String,
    /// Row count.
    pub rows: usize,
    /// Per-column profiles, in header order.
    pub columns: Vec<ColumnProfile>,
}

const PROFILE_TOP_N: usize = 5;

/// Profile every column of `sheet`.
pub fn profile_sheet(sheet: &Sheet) -> SheetProfile {
    let rows = sheet.row_count();
    let columns = sheet
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let column = sheet.column(idx);
            let nulls = column.iter().filter(|v| v.is_null()).count();
            // top_values over the full column also yields the distinct count.
            let all = top_values(&column, usize::MAX);
            let distinct = all.len();
            let mut top = all;
            top.truncate(PROFILE_TOP_N);
            ColumnProfile {
                name: name.clone(),
                rows,
                nulls,
                null_pct: if rows == 0 {
                    0.0
                } else {
                    (nulls as f64 / rows as f64) * 100.0
                },
                distinct,
                top,
            }
        })
        .collect();

    SheetProfile {
        sheet: sheet.name.clone(),
        rows,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::profile_sheet;
    use crate::types::{CellValue, Sheet};

    #[test]
    fn profiles_nulls_and_distinct_counts() {
        let sheet = Sheet::new(
            "Sheet1",
            vec!["region".into()],
            vec![
                vec![CellValue::Text("north".into())],
                vec![CellValue::Text("north".into())],
                vec![CellValue::Null],
                vec![CellValue::Text("south".into())],
            ],
        );
        let profile = profile_sheet(&sheet);
        assert_eq!(profile.rows, 4);
        assert_eq!(profile.columns.len(), 1);

        let col = &profile.columns[0];
        assert_eq!(col.nulls, 1);
        assert_eq!(col.null_pct, 25.0);
        assert_eq!(col.distinct, 2);
        assert_eq!(col.top[0].value, "north");
        assert_eq!(col.top[0].count, 2);
    }

    #[test]
    fn empty_sheet_profiles_without_dividing_by_zero() {
        let sheet = Sheet::new("empty", vec!["a".into()], vec![]);
        let profile = profile_sheet(&sheet);
        assert_eq!(profile.columns[0].null_pct, 0.0);
        assert_eq!(profile.columns[0].distinct, 0);
    }
}
