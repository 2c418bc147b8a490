//! Tests of the read-only endpoints exposed to API clients.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{TestApp, active};

#[tokio::test]
async fn test_gateway_browse_matches_action_browse() {
    let app = TestApp::new();
    app.upload(
        active("42"),
        Some(json!({ "path": "/maps" })),
        "roads.geojson",
        br#"{"type":"FeatureCollection","features":[]}"#,
    )
    .await;

    let action = app
        .request("GET", "/action/file-system", None, Some(active("42")))
        .await;
    let gateway = app
        .request("GET", "/api/file-system", None, Some(active("42")))
        .await;

    assert_eq!(gateway.status, StatusCode::OK);
    assert_eq!(gateway.result(), action.result());
    assert_eq!(gateway.result()["count"], 1);
}

#[tokio::test]
async fn test_gateway_download() {
    let app = TestApp::new();
    app.upload(
        active("42"),
        Some(json!({ "path": "/maps" })),
        "roads.geojson",
        br#"{"type":"FeatureCollection","features":[]}"#,
    )
    .await;

    let download = app
        .download("/api/file-system", active("42"), "/maps/roads.geojson")
        .await;

    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.headers["content-type"], "application/geo+json");
    assert_eq!(
        download.headers["content-disposition"],
        "attachment; filename=roads.geojson"
    );
    assert_eq!(
        download.body,
        br#"{"type":"FeatureCollection","features":[]}"#
    );
}

#[tokio::test]
async fn test_gateway_is_read_only() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/file-system/files",
            Some(json!({})),
            Some(active("42")),
        )
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .request(
            "DELETE",
            "/api/file-system?path=/maps",
            None,
            Some(active("42")),
        )
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_gateway_requires_identity() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/file-system", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("BasicMessageCode.AUTHENTICATION"));
}
