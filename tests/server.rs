#![cfg(feature = "server")]

use actix_multipart::form::tempfile::TempFileConfig;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{test, web, App};

use column_tally::analysis::AnalysisOptions;
use column_tally::web::{configure, AppState, ServerConfig};

fn state_with_workbook(default_workbook: std::path::PathBuf) -> web::Data<AppState> {
    web::Data::new(AppState {
        config: ServerConfig {
            default_workbook,
            ..Default::default()
        },
        options: AnalysisOptions::default(),
    })
}

fn multipart_upload(filename: &str, contents: &str) -> (String, String) {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );
    (
        format!("multipart/form-data; boundary={boundary}"),
        body,
    )
}

#[actix_web::test]
async fn analyze_default_returns_404_when_workbook_missing() {
    let state = state_with_workbook("no_such_workbook.xlsx".into());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::get().uri("/analyze-default").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn analyze_default_classifies_the_configured_workbook() {
    use rust_xlsxwriter::Workbook;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "L").unwrap();
    ws.write_string(1, 0, "Enfra").unwrap();
    ws.write_string(2, 0, "SMS LD").unwrap();
    wb.save(&path).unwrap();

    let state = state_with_workbook(path);
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::get().uri("/analyze-default").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["column_name"], "L");
    assert_eq!(body["data"]["classification"]["total"], 2);
    assert_eq!(body["data"]["classification"]["categories"][0]["count"], 1);
    assert!(body["pie_chart"].as_str().unwrap().len() > 100);
    assert!(body["bar_chart"].as_str().unwrap().len() > 100);
}

#[actix_web::test]
async fn upload_with_non_spreadsheet_extension_is_rejected() {
    let state = state_with_workbook("unused.xlsx".into());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let (content_type, body) = multipart_upload("notes.txt", "hello");
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn uploaded_csv_is_classified_and_charted() {
    let state = state_with_workbook("unused.xlsx".into());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let csv = "id,L\n1,Enfra\n2,sms-ld\n3,misc\n";
    let (content_type, body) = multipart_upload("upload.csv", csv);
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["classification"]["total"], 3);
    assert_eq!(response["data"]["classification"]["other"], 1);

    // Chart payloads decode back to PNG bytes.
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    let png = STANDARD
        .decode(response["pie_chart"].as_str().unwrap())
        .unwrap();
    assert_eq!(&png[..4], b"\x89PNG");
}

#[actix_web::test]
async fn upload_larger_than_the_size_limit_is_rejected() {
    let state = state_with_workbook("unused.xlsx".into());
    let app = test::init_service(
        App::new()
            .app_data(state)
            .app_data(MultipartFormConfig::default().total_limit(256))
            .configure(configure),
    )
    .await;

    let filler = "x,y\n".repeat(2048);
    let (content_type, body) = multipart_upload("big.csv", &filler);
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(!resp.status().is_success());
}

#[actix_web::test]
async fn upload_temp_file_is_removed_after_processing() {
    let uploads = tempfile::tempdir().unwrap();
    let state = state_with_workbook("unused.xlsx".into());
    let app = test::init_service(
        App::new()
            .app_data(state)
            .app_data(TempFileConfig::default().directory(uploads.path()))
            .configure(configure),
    )
    .await;

    let (content_type, body) = multipart_upload("upload.csv", "id,L\n1,Enfra\n");
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // The upload was staged in `uploads` and deleted once the handler
    // finished.
    assert!(std::fs::read_dir(uploads.path()).unwrap().next().is_none());
}

#[actix_web::test]
async fn index_serves_the_upload_page() {
    let state = state_with_workbook("unused.xlsx".into());
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("multipart/form-data"));
}
