//! Manual IndexNow submission through the admin API

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carstreet::backend::server::RunMode;
use common::{admin_token, spawn, spawn_with, test_config};

async fn app_with_endpoint(endpoint: String) -> (common::TestApp, String) {
    let root = TempDir::new().unwrap();
    let mut config = test_config(RunMode::Development, root.path());
    config.indexnow_endpoint = endpoint;
    let app = spawn_with(root, config, |_| {});
    let token = admin_token(&app.store).await;
    (app, token)
}

#[tokio::test]
async fn test_manual_submission_reports_engine_status() {
    let engine = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(body_partial_json(json!({
            "host": "carstreet.ca",
            "keyLocation": "https://carstreet.ca/carstreet-indexnow-key-2024.txt",
            "urlList": ["https://carstreet.ca/about"]
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&engine)
        .await;

    let (app, token) = app_with_endpoint(format!("{}/indexnow", engine.uri())).await;
    let result: Value = app
        .server
        .post("/api/admin/indexnow")
        .authorization_bearer(token)
        .json(&json!({ "urls": ["/about"], "type": "page" }))
        .await
        .json();

    assert_eq!(
        result,
        json!({
            "success": true,
            "status": 202,
            "message": "Submitted 1 URLs to IndexNow",
            "urls": ["https://carstreet.ca/about"],
            "type": "page"
        })
    );
}

#[tokio::test]
async fn test_empty_submission_is_400() {
    let app = spawn();
    let token = admin_token(&app.store).await;

    let response = app
        .server
        .post("/api/admin/indexnow")
        .authorization_bearer(token)
        .json(&json!({ "urls": [] }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "No URLs provided");
}

#[tokio::test]
async fn test_unreachable_engine_is_502() {
    let (app, token) = app_with_endpoint("http://127.0.0.1:9/indexnow".to_string()).await;

    app.server
        .post("/api/admin/indexnow")
        .authorization_bearer(token)
        .json(&json!({ "urls": ["/inventory"] }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_manual_submission_requires_admin() {
    let app = spawn();

    app.server
        .post("/api/admin/indexnow")
        .json(&json!({ "urls": ["/"] }))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
