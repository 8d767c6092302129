use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{CellValue, Sheet};

/// Which worksheet to read from a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelection {
    /// Read the first sheet (default).
    First,
    /// Read a single named sheet.
    Named(String),
}

impl Default for SheetSelection {
    fn default() -> Self {
        Self::First
    }
}

/// Read one worksheet of an Excel document (`.xlsx`, `.xls`, `.ods`, ...)
/// into an in-memory [`Sheet`].
///
/// Behavior:
/// - Picks the sheet per `selection`; [`SheetSelection::First`] uses the
///   first sheet in workbook order
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows, converting cells losslessly into [`CellValue`]s
///   (no schema involved; classification works on string forms)
pub fn read_sheet_from_path(
    path: impl AsRef<Path>,
    selection: &SheetSelection,
) -> AnalysisResult<Sheet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = match selection {
        SheetSelection::Named(name) => name.clone(),
        SheetSelection::First => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AnalysisError::SourceRead {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    read_sheet_range(&sheet_name, &range)
}

fn read_sheet_range(sheet: &str, range: &calamine::Range<Data>) -> AnalysisResult<Sheet> {
    let mut rows_iter = range.rows().enumerate();

    // Header row: first row with any non-empty cell.
    let headers: Vec<String> = rows_iter
        .by_ref()
        .find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(_, row)| row.iter().map(cell_to_header_string).collect())
        .ok_or_else(|| AnalysisError::SourceRead {
            message: format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
        })?;

    let width = headers.len();
    let rows: Vec<Vec<CellValue>> = rows_iter
        .map(|(_, row)| {
            row.iter()
                .take(width)
                .map(convert_cell)
                .collect::<Vec<CellValue>>()
        })
        .collect();

    Ok(Sheet::new(sheet, headers, rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

fn convert_cell(c: &Data) -> CellValue {
    match c {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Int(i) => CellValue::Int64(*i),
        Data::Float(f) => CellValue::Float64(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("{e:?}")),
    }
}
