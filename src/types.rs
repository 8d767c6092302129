//! In-memory sheet model.
//!
//! Ingestion produces a [`Sheet`]: the header row plus row-major
//! [`CellValue`] storage. No user-provided schema is involved; cells keep
//! whatever scalar type the source carried, and classification works on
//! their string form.

use std::fmt;

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/empty cell.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 text.
    Text(String),
}

impl CellValue {
    /// True for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The raw string form used for rule matching and frequency display.
    ///
    /// Integral floats print without the trailing `.0` so that `42` read
    /// from Excel (always a float there) and `42` read from CSV agree.
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Int64(i) => i.to_string(),
            CellValue::Float64(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// An ingested worksheet: header names plus row-major cell storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Source sheet name (file stem for CSV).
    pub name: String,
    /// Ordered column headers.
    pub headers: Vec<String>,
    /// Row-major cell storage. Rows may be shorter than the header row;
    /// [`Sheet::column`] reads missing trailing cells as [`CellValue::Null`].
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a sheet from headers and rows.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (header width).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Extract one column by zero-based index, one value per row.
    ///
    /// Rows that do not reach `idx` contribute [`CellValue::Null`], so the
    /// result always has exactly [`Sheet::row_count`] entries.
    pub fn column(&self, idx: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(CellValue::Null))
            .collect()
    }
}
