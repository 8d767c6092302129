//! HTTP server front-end: upload-and-analyze plus a default-workbook
//! endpoint, returning tallies and base64 chart PNGs as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use column_tally::analysis::AnalysisOptions;
use column_tally::observability::StdErrObserver;
use column_tally::web::{run_server, ServerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "column-tally-server",
    about = "Serve spreadsheet column classification over HTTP"
)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0:5000")]
    bind: String,

    /// Workbook served by GET /analyze-default.
    #[arg(long, default_value = "DB.xlsx")]
    default_workbook: PathBuf,

    /// Upload size limit in bytes.
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_upload_bytes: usize,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig {
        bind_addr: cli.bind,
        default_workbook: cli.default_workbook,
        max_upload_bytes: cli.max_upload_bytes,
    };
    let options = AnalysisOptions {
        observer: Some(Arc::new(StdErrObserver)),
        ..Default::default()
    };

    eprintln!("[server] listening on {}", config.bind_addr);
    run_server(config, options).await
}
