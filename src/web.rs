#![cfg(feature = "server")]

//! HTTP surface: upload-and-analyze endpoints returning the classification
//! report plus base64-encoded chart PNGs.
//!
//! All configuration is an explicit [`ServerConfig`] value handed to
//! [`run_server`]; there is no process-global state. Uploaded files land in
//! OS temp storage via `actix-multipart`'s `TempFile` and are removed as
//! soon as the request handler finishes.

use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, App, HttpResponse, HttpServer};
use serde::Serialize;

use crate::analysis::{analyze_from_path, AnalysisOptions, AnalysisReport};
use crate::chart::{bar::render_bar_png, pie::render_pie_png, png_base64, ChartStyle};
use crate::error::{AnalysisError, AnalysisResult};
use crate::ingestion::SourceFormat;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:5000`.
    pub bind_addr: String,
    /// Workbook served by `GET /analyze-default`.
    pub default_workbook: PathBuf,
    /// Upload size limit in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            default_workbook: PathBuf::from("DB.xlsx"),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Shared per-worker state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,
    /// Analysis options applied to every request.
    pub options: AnalysisOptions,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    success: bool,
    data: AnalysisReport,
    pie_chart: String,
    bar_chart: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.into(),
    })
}

fn status_for_error(e: &AnalysisError) -> StatusCode {
    match e {
        AnalysisError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        AnalysisError::Io(_) | AnalysisError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn render_charts(report: &AnalysisReport) -> AnalysisResult<(String, String)> {
    let classification = &report.classification;
    let pie = render_pie_png(
        classification,
        &ChartStyle::titled(format!("Column {} Distribution", report.column_name)),
    )?;
    let bar = render_bar_png(classification, &ChartStyle::titled("Count Comparison"))?;
    Ok((png_base64(&pie), png_base64(&bar)))
}

fn analysis_response(result: AnalysisResult<AnalysisReport>) -> HttpResponse {
    let report = match result {
        Ok(report) => report,
        Err(e) => return error_response(status_for_error(&e), e.to_string()),
    };
    match render_charts(&report) {
        Ok((pie_chart, bar_chart)) => HttpResponse::Ok().json(AnalyzeResponse {
            success: true,
            data: report,
            pie_chart,
            bar_chart,
        }),
        Err(e) => error_response(status_for_error(&e), e.to_string()),
    }
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Column Tally</title></head>
<body>
<h1>Column Tally</h1>
<form action="/analyze" method="post" enctype="multipart/form-data">
  <input type="file" name="file" accept=".xlsx,.xls,.xlsm,.xlsb,.ods,.csv">
  <button type="submit">Analyze</button>
</form>
<p><a href="/analyze-default">Analyze the default workbook</a></p>
</body>
</html>
"#;

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[derive(Debug, MultipartForm)]
struct UploadForm {
    #[multipart(rename = "file")]
    file: TempFile,
}

#[post("/analyze")]
async fn analyze(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> HttpResponse {
    let file_name = form.file.file_name.as_deref().unwrap_or("");
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    if !SourceFormat::is_spreadsheet_extension(ext) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "please upload a spreadsheet file (.xlsx, .xls, .xlsm, .xlsb, .ods or .csv)",
        );
    }

    // The temp file path carries no meaningful extension; force the format
    // from the uploaded name.
    let mut options = state.options.clone();
    options.format = SourceFormat::from_extension(ext);
    let path = form.file.file.path().to_path_buf();

    let result = web::block(move || analyze_from_path(&path, &options)).await;
    // `form` still owns the temp file here; it is removed when the handler
    // returns.
    match result {
        Ok(analysis) => analysis_response(analysis),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

#[get("/analyze-default")]
async fn analyze_default(state: web::Data<AppState>) -> HttpResponse {
    let workbook = state.config.default_workbook.clone();
    if !workbook.exists() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("default workbook not found: {}", workbook.display()),
        );
    }

    let options = state.options.clone();
    let result = web::block(move || analyze_from_path(&workbook, &options)).await;
    match result {
        Ok(analysis) => analysis_response(analysis),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Register all routes on an actix service config.
///
/// Shared between [`run_server`] and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(analyze).service(analyze_default);
}

/// Run the HTTP server until shutdown.
pub async fn run_server(config: ServerConfig, options: AnalysisOptions) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let max_upload = config.max_upload_bytes;
    let state = web::Data::new(AppState { config, options });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(MultipartFormConfig::default().total_limit(max_upload))
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
