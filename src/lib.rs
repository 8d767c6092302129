//! `column-tally` ingests a spreadsheet, classifies every value of a target
//! column into named categories by case-insensitive substring rules, tallies
//! the categories, and renders the tallies as pie/bar chart PNGs.
//!
//! The primary entrypoint is [`analysis::analyze_from_path`], which
//! auto-detects the source format from the file extension (`.xlsx`, `.xls`,
//! `.xlsm`, `.xlsb`, `.ods`, `.csv`), resolves the target column (exact
//! header name first, positional fallback second), and runs the classifier.
//!
//! ## Quick example: classify a column in memory
//!
//! ```rust
//! use column_tally::classify::{classify, default_rules};
//! use column_tally::types::CellValue;
//!
//! let column = vec![
//!     CellValue::Text("Enfra".into()),
//!     CellValue::Text("sms ld".into()),
//!     CellValue::Null,
//!     CellValue::Text("ENFRA-West".into()),
//!     CellValue::Text("Other".into()),
//!     CellValue::Text("SMS-LD".into()),
//! ];
//!
//! let result = classify(&column, &default_rules()).unwrap();
//! assert_eq!(result.count_for("Enfra"), Some(2));
//! assert_eq!(result.count_for("SMS LD"), Some(2));
//! assert_eq!(result.other, 2);
//! assert_eq!(result.total, 6);
//! ```
//!
//! ## Quick example: analyze a file end to end
//!
//! ```no_run
//! use column_tally::analysis::{analyze_from_path, AnalysisOptions};
//! use column_tally::chart::{pie::render_pie_png, ChartStyle};
//!
//! # fn main() -> Result<(), column_tally::AnalysisError> {
//! let report = analyze_from_path("DB.xlsx", &AnalysisOptions::default())?;
//! println!("analyzed column '{}', {} rows", report.column_name, report.total_rows());
//!
//! let png = render_pie_png(&report.classification, &ChartStyle::default())?;
//! std::fs::write("distribution.png", png)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`analysis`]: end-to-end orchestration (ingest, resolve, classify)
//! - [`classify`]: the classification core and frequency summary
//! - [`resolve`]: name-or-positional target column resolution
//! - [`ingestion`]: Excel/CSV readers producing an in-memory [`types::Sheet`]
//! - [`chart`]: pie/bar PNG rendering of a tally
//! - [`profile`]: per-column dataset overview for diagnostics
//! - [`observability`]: observer hooks for logging and alerting
//! - [`web`] (feature `server`): HTTP upload/analyze endpoints
//! - [`error`]: error types used across the crate

pub mod analysis;
pub mod chart;
pub mod classify;
pub mod error;
pub mod ingestion;
pub mod observability;
pub mod profile;
pub mod resolve;
pub mod types;
#[cfg(feature = "server")]
pub mod web;

pub use error::{AnalysisError, AnalysisResult};
