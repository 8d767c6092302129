//! Observer hooks for analysis outcomes.
//!
//! The CLI and HTTP surfaces attach an [`AnalysisObserver`] via
//! [`crate::analysis::AnalysisOptions`] to get structured logging and
//! alerting without the core knowing anything about its callers. Events
//! carry the analysis outcome itself: which column was classified and how
//! the tally split between matched categories and the Other bucket.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AnalysisError;
use crate::ingestion::SourceFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Severity assigned to an [`AnalysisError`] when reporting failures.
pub fn severity_for_error(e: &AnalysisError) -> Severity {
    match e {
        AnalysisError::Io(_) => Severity::Critical,
        AnalysisError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        AnalysisError::Excel(_)
        | AnalysisError::SourceRead { .. }
        | AnalysisError::ColumnNotFound { .. }
        | AnalysisError::InvalidRules { .. }
        | AnalysisError::Render { .. } => Severity::Error,
    }
}

/// Context about an analysis attempt.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// The input path being analyzed.
    pub path: PathBuf,
    /// Source format, when known before failure.
    pub format: Option<SourceFormat>,
}

impl fmt::Display for AnalysisContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            Some(format) => write!(f, "{} ({format:?})", self.path.display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Outcome stats reported on successful analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Header name of the classified column.
    pub column: String,
    /// Total number of classified rows.
    pub rows: usize,
    /// Rows assigned to a named category.
    pub matched: usize,
    /// Rows in the Other bucket (null or unmatched).
    pub other: usize,
}

fn success_line(ctx: &AnalysisContext, stats: &AnalysisStats) -> String {
    format!(
        "ok {ctx}: column '{}' rows={} matched={} other={}",
        stats.column, stats.rows, stats.matched, stats.other
    )
}

fn failure_line(ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) -> String {
    format!("{severity:?} {ctx}: {error}")
}

/// Observer interface for analysis outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait AnalysisObserver: Send + Sync {
    /// Called when analysis succeeds.
    fn on_success(&self, _ctx: &AnalysisContext, _stats: &AnalysisStats) {}

    /// Called when analysis fails.
    fn on_failure(&self, _ctx: &AnalysisContext, _severity: Severity, _error: &AnalysisError) {}

    /// Called when a failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn AnalysisObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn AnalysisObserver>>) -> Self {
        Self { observers }
    }

    fn each(&self, f: impl Fn(&dyn AnalysisObserver)) {
        for o in &self.observers {
            f(o.as_ref());
        }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl AnalysisObserver for CompositeObserver {
    fn on_success(&self, ctx: &AnalysisContext, stats: &AnalysisStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Logs analysis events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl AnalysisObserver for StdErrObserver {
    fn on_success(&self, ctx: &AnalysisContext, stats: &AnalysisStats) {
        eprintln!("[analyze] {}", success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        eprintln!("[analyze] {}", failure_line(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        eprintln!("[analyze] ALERT {}", failure_line(ctx, severity, error));
    }
}

/// Appends analysis events to a local log file.
///
/// The file is opened lazily on the first event and kept open; writes are
/// best-effort, and a failed write drops the handle so the next event
/// retries the open.
pub struct FileObserver {
    path: PathBuf,
    sink: Mutex<Option<File>>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sink: Mutex::new(None),
        }
    }

    fn write_line(&self, line: &str) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        if sink.is_none() {
            *sink = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .ok();
        }
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if let Some(f) = sink.as_mut() {
            if writeln!(f, "{ts} {line}").is_err() {
                *sink = None;
            }
        }
    }
}

impl fmt::Debug for FileObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileObserver").field("path", &self.path).finish()
    }
}

impl AnalysisObserver for FileObserver {
    fn on_success(&self, ctx: &AnalysisContext, stats: &AnalysisStats) {
        self.write_line(&success_line(ctx, stats));
    }

    fn on_failure(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        self.write_line(&failure_line(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &AnalysisContext, severity: Severity, error: &AnalysisError) {
        self.write_line(&format!("ALERT {}", failure_line(ctx, severity, error)));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::{
        failure_line, severity_for_error, success_line, AnalysisContext, AnalysisObserver,
        AnalysisStats, CompositeObserver, FileObserver, Severity,
    };
    use crate::error::AnalysisError;
    use crate::ingestion::SourceFormat;

    fn ctx() -> AnalysisContext {
        AnalysisContext {
            path: PathBuf::from("DB.xlsx"),
            format: Some(SourceFormat::Excel),
        }
    }

    fn stats() -> AnalysisStats {
        AnalysisStats {
            column: "L".to_string(),
            rows: 6,
            matched: 4,
            other: 2,
        }
    }

    #[test]
    fn event_lines_carry_the_classification_outcome() {
        let line = success_line(&ctx(), &stats());
        assert_eq!(line, "ok DB.xlsx (Excel): column 'L' rows=6 matched=4 other=2");

        let err = AnalysisError::ColumnNotFound {
            target: "L".to_string(),
            columns: 2,
        };
        let line = failure_line(&ctx(), Severity::Error, &err);
        assert!(line.starts_with("Error DB.xlsx (Excel): "));
        assert!(line.contains("column 'L' not found"));
    }

    #[test]
    fn io_errors_are_critical_everything_else_is_error() {
        let io = AnalysisError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(severity_for_error(&io), Severity::Critical);

        let rules = AnalysisError::InvalidRules {
            message: "rule list is empty".to_string(),
        };
        assert_eq!(severity_for_error(&rules), Severity::Error);
    }

    #[test]
    fn file_observer_appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("analysis.log");
        let obs = FileObserver::new(&log);

        obs.on_success(&ctx(), &stats());
        let err = AnalysisError::SourceRead {
            message: "no sheets".to_string(),
        };
        obs.on_alert(&ctx(), Severity::Error, &err);

        let contents = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("column 'L' rows=6 matched=4 other=2"));
        assert!(lines[1].contains("ALERT Error DB.xlsx (Excel)"));
    }

    #[derive(Default)]
    struct Counting {
        successes: Mutex<usize>,
    }

    impl AnalysisObserver for Counting {
        fn on_success(&self, _ctx: &AnalysisContext, _stats: &AnalysisStats) {
            *self.successes.lock().unwrap() += 1;
        }
    }

    #[test]
    fn composite_fans_out_to_every_observer() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let composite = CompositeObserver::new(vec![a.clone(), b.clone()]);

        composite.on_success(&ctx(), &stats());

        assert_eq!(*a.successes.lock().unwrap(), 1);
        assert_eq!(*b.successes.lock().unwrap(), 1);
    }
}
