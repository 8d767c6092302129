//! CSV ingestion implementation.

use std::path::Path;

use crate::error::AnalysisResult;
use crate::types::{CellValue, Sheet};

/// Read a CSV file into an in-memory [`Sheet`].
///
/// Rules:
///
/// - The CSV must have a header row; it becomes [`Sheet::headers`].
/// - Values are inferred loosely: integer, then float, otherwise text.
///   Empty fields map to [`CellValue::Null`].
pub fn read_sheet_from_path(path: impl AsRef<Path>) -> AnalysisResult<Sheet> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("csv")
        .to_string();

    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    read_sheet_from_reader(name, &mut rdr)
}

/// Read CSV data from an existing CSV reader.
pub fn read_sheet_from_reader<R: std::io::Read>(
    name: impl Into<String>,
    rdr: &mut csv::Reader<R>,
) -> AnalysisResult<Sheet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(infer_value).collect());
    }

    Ok(Sheet::new(name, headers, rows))
}

fn infer_value(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int64(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float64(f);
    }
    CellValue::Text(raw.to_string())
}
