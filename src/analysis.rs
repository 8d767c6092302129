//! End-to-end analysis orchestration.
//!
//! [`analyze_from_path`] is the entrypoint shared by the CLI and the HTTP
//! surface: ingest a spreadsheet, resolve the target column, classify it,
//! and summarize the most frequent raw values. When an observer is
//! configured, success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::classify::{
    classify, default_rules, top_values, CategoryRule, Classification, ValueCount,
};
use crate::error::AnalysisResult;
use crate::ingestion::{read_sheet_from_path, IngestOptions, SheetSelection, SourceFormat};
use crate::observability::{
    severity_for_error, AnalysisContext, AnalysisObserver, AnalysisStats, Severity,
};
use crate::resolve::ColumnSelector;
use crate::types::Sheet;

/// Options controlling end-to-end analysis.
///
/// Use [`Default`] for the stock behavior: auto-detected format, first
/// sheet, target column `L` with positional fallback 11, the
/// [`default_rules`] categories, and a top-10 frequency summary.
#[derive(Clone)]
pub struct AnalysisOptions {
    /// If `None`, auto-detect the source format from the file extension.
    pub format: Option<SourceFormat>,
    /// Which worksheet to read (ignored for CSV).
    pub sheet: SheetSelection,
    /// How to locate the target column.
    pub selector: ColumnSelector,
    /// Ordered category rules; earlier rules win on double matches.
    pub rules: Vec<CategoryRule>,
    /// How many distinct values the frequency summary keeps.
    pub top_n: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn AnalysisObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("selector", &self.selector)
            .field("rules", &self.rules)
            .field("top_n", &self.top_n)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: SheetSelection::default(),
            selector: ColumnSelector::default(),
            rules: default_rules(),
            top_n: 10,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Result of one full analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Header name of the analyzed column.
    pub column_name: String,
    /// Zero-based index of the analyzed column.
    pub column_index: usize,
    /// Per-category tallies (plus the Other bucket and total).
    pub classification: Classification,
    /// Frequency breakdown of the most common raw values.
    pub top_values: Vec<ValueCount>,
}

impl AnalysisReport {
    /// Total number of classified rows.
    pub fn total_rows(&self) -> usize {
        self.classification.total
    }
}

/// Analyze a spreadsheet file end to end.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >=
///   `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use column_tally::analysis::{analyze_from_path, AnalysisOptions};
///
/// # fn main() -> Result<(), column_tally::AnalysisError> {
/// let report = analyze_from_path("DB.xlsx", &AnalysisOptions::default())?;
/// for cat in &report.classification.categories {
///     println!("{}: {}", cat.name, cat.count);
/// }
/// println!("Others: {}", report.classification.other);
/// # Ok(())
/// # }
/// ```
pub fn analyze_from_path(
    path: impl AsRef<Path>,
    options: &AnalysisOptions,
) -> AnalysisResult<AnalysisReport> {
    let path = path.as_ref();

    let format = options.format.or_else(|| {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(SourceFormat::from_extension)
    });
    let ctx = AnalysisContext {
        path: path.to_path_buf(),
        format,
    };

    let result = run(path, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(report) => {
                let tally = &report.classification;
                obs.on_success(
                    &ctx,
                    &AnalysisStats {
                        column: report.column_name.clone(),
                        rows: tally.total,
                        matched: tally.total - tally.other,
                        other: tally.other,
                    },
                );
            }
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn run(path: &Path, options: &AnalysisOptions) -> AnalysisResult<AnalysisReport> {
    let ingest = IngestOptions {
        format: options.format,
        sheet: options.sheet.clone(),
    };
    let sheet = read_sheet_from_path(path, &ingest)?;
    analyze_sheet(&sheet, options)
}

/// Analyze an already-ingested [`Sheet`] (the pure part, no I/O).
pub fn analyze_sheet(sheet: &Sheet, options: &AnalysisOptions) -> AnalysisResult<AnalysisReport> {
    let resolved = options.selector.resolve(&sheet.headers)?;
    let column = sheet.column(resolved.index);
    let classification = classify(&column, &options.rules)?;
    let top = top_values(&column, options.top_n);

    Ok(AnalysisReport {
        column_name: resolved.name,
        column_index: resolved.index,
        classification,
        top_values: top,
    })
}
