//! CLI front-end: analyze a spreadsheet and print the category tally,
//! optionally writing chart PNGs and a per-column dataset overview.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use column_tally::analysis::{analyze_from_path, AnalysisOptions};
use column_tally::chart::{bar::render_bar_png, pie::render_pie_png, ChartStyle};
use column_tally::error::AnalysisResult;
use column_tally::ingestion::{read_sheet_from_path, IngestOptions, SheetSelection};
use column_tally::observability::{
    AnalysisObserver, CompositeObserver, FileObserver, StdErrObserver,
};
use column_tally::profile::profile_sheet;
use column_tally::resolve::ColumnSelector;

#[derive(Debug, Parser)]
#[command(
    name = "column-tally",
    about = "Classify a spreadsheet column into categories and tally the results"
)]
struct Cli {
    /// Spreadsheet to analyze (.xlsx, .xls, .xlsm, .xlsb, .ods or .csv).
    #[arg(default_value = "DB.xlsx")]
    path: PathBuf,

    /// Worksheet name (first sheet when omitted; ignored for CSV).
    #[arg(long)]
    sheet: Option<String>,

    /// Target column header name.
    #[arg(long, default_value = "L")]
    column: String,

    /// Zero-based positional fallback when the header is absent.
    #[arg(long, default_value_t = 11)]
    fallback_index: usize,

    /// Number of distinct values in the frequency breakdown.
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Also print a per-column dataset overview.
    #[arg(long)]
    profile: bool,

    /// Write column_pie.png and column_bar.png into this directory.
    #[arg(long)]
    charts_dir: Option<PathBuf>,

    /// Append analysis events to this log file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> AnalysisResult<()> {
    let mut observers: Vec<Arc<dyn AnalysisObserver>> = vec![Arc::new(StdErrObserver)];
    if let Some(log) = &cli.log_file {
        observers.push(Arc::new(FileObserver::new(log)));
    }

    let sheet_selection = match &cli.sheet {
        Some(name) => SheetSelection::Named(name.clone()),
        None => SheetSelection::First,
    };
    let options = AnalysisOptions {
        sheet: sheet_selection.clone(),
        selector: ColumnSelector::new(&cli.column, cli.fallback_index),
        top_n: cli.top,
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    };

    let report = analyze_from_path(&cli.path, &options)?;

    println!(
        "Analyzing column: {} (index {})",
        report.column_name, report.column_index
    );
    println!("Total rows: {}", report.total_rows());
    println!();
    println!("Counts:");
    for cat in &report.classification.categories {
        println!("  {}: {}", cat.name, cat.count);
    }
    println!("  Others: {}", report.classification.other);

    if !report.top_values.is_empty() {
        println!();
        println!("Top values:");
        for v in &report.top_values {
            println!("  {}: {}", v.value, v.count);
        }
    }

    if let Some(dir) = &cli.charts_dir {
        std::fs::create_dir_all(dir)?;
        let pie = render_pie_png(
            &report.classification,
            &ChartStyle::titled(format!("Column {} Distribution", report.column_name)),
        )?;
        let bar = render_bar_png(
            &report.classification,
            &ChartStyle::titled("Count Comparison"),
        )?;
        let pie_path = dir.join("column_pie.png");
        let bar_path = dir.join("column_bar.png");
        std::fs::write(&pie_path, pie)?;
        std::fs::write(&bar_path, bar)?;
        println!();
        println!("Charts written: {} {}", pie_path.display(), bar_path.display());
    }

    if cli.profile {
        let sheet = read_sheet_from_path(
            &cli.path,
            &IngestOptions {
                format: None,
                sheet: sheet_selection,
            },
        )?;
        let profile = profile_sheet(&sheet);
        println!();
        println!("Dataset overview ({} rows):", profile.rows);
        for col in &profile.columns {
            println!(
                "  {:<20} nulls={} ({:.1}%) distinct={}",
                col.name, col.nulls, col.null_pct, col.distinct
            );
            for v in &col.top {
                println!("    {}: {}", v.value, v.count);
            }
        }
    }

    Ok(())
}
