use thiserror::Error;

/// Convenience result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type returned across ingestion, classification, and rendering.
///
/// This is a single error enum shared by the library, the CLI, and the HTTP
/// surface; classification either fully succeeds or reports exactly one of
/// these (no partial results).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Excel/workbook read error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The source file could not be interpreted as a spreadsheet
    /// (unknown extension, missing sheet, no header row, ...).
    #[error("source read error: {message}")]
    SourceRead { message: String },

    /// The target column is absent and the positional fallback is out of range.
    #[error("column '{target}' not found ({columns} columns available)")]
    ColumnNotFound { target: String, columns: usize },

    /// The category rule set is malformed (empty rules, empty patterns).
    #[error("invalid rules: {message}")]
    InvalidRules { message: String },

    /// Chart rendering failed.
    #[error("render error: {message}")]
    Render { message: String },
}
