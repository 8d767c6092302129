//! Spreadsheet ingestion.
//!
//! Most callers should use [`read_sheet_from_path`], which:
//!
//! - auto-detects the source format by file extension (or you can force one
//!   via [`IngestOptions`])
//! - reads one worksheet into an in-memory [`crate::types::Sheet`]
//!
//! Format-specific functions are also available under [`excel`] and [`csv`].

pub mod csv;
pub mod excel;

use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::Sheet;

pub use excel::SheetSelection;

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Workbook formats read via calamine.
    Excel,
    /// Comma-separated values.
    Csv,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Whether `ext` names a format uploads may carry.
    pub fn is_spreadsheet_extension(ext: &str) -> bool {
        Self::from_extension(ext).is_some()
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// If `None`, auto-detect format from the file extension.
    pub format: Option<SourceFormat>,
    /// Which worksheet to read from a workbook (ignored for CSV).
    pub sheet: SheetSelection,
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, the format is inferred from the file
///   extension; an unknown extension fails with
///   [`AnalysisError::SourceRead`].
/// - Use `options.sheet` to pick a worksheet other than the first.
pub fn read_sheet_from_path(
    path: impl AsRef<Path>,
    options: &IngestOptions,
) -> AnalysisResult<Sheet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    match format {
        SourceFormat::Excel => excel::read_sheet_from_path(path, &options.sheet),
        SourceFormat::Csv => csv::read_sheet_from_path(path),
    }
}

fn infer_format_from_path(path: &Path) -> AnalysisResult<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AnalysisError::SourceRead {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    SourceFormat::from_extension(ext).ok_or_else(|| AnalysisError::SourceRead {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
