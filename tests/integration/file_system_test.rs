//! End-to-end tests of the browser-facing file system endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use userfs_core::types::ByteSize;

use helpers::{Caller, TestApp, active};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.result()["status"], "ok");
}

#[tokio::test]
async fn test_browse_new_user_is_empty() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/action/file-system", None, Some(active("1")))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let tree = response.result();
    assert_eq!(tree["path"], "/");
    assert_eq!(tree["count"], 0);
    assert_eq!(tree["size"], 0);
    assert!(tree["files"].as_array().unwrap().is_empty());
    assert!(tree["folders"].as_array().unwrap().is_empty());
    assert!(app.user_root("1").is_dir());
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("GET", "/action/file-system", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);

    let response = app
        .request(
            "GET",
            "/action/file-system",
            None,
            Some(Caller {
                key: "../etc",
                status: "COMPLETED",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inactive_account_is_forbidden() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/action/file-system",
            None,
            Some(Caller {
                key: "1",
                status: "PENDING",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(!app.user_root("1").exists());
}

#[tokio::test]
async fn test_create_folder_and_conflict() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/action/file-system/folders",
            Some(json!({ "path": "/test/nested" })),
            Some(active("1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let test = &response.result()["folders"][0];
    assert_eq!(test["name"], "test");
    assert_eq!(test["folders"][0]["path"], "/test/nested");

    let response = app
        .request(
            "POST",
            "/action/file-system/folders",
            Some(json!({ "path": "test/nested/" })),
            Some(active("1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.error_code(),
        Some("FileSystem.PATH_ALREADY_EXISTS")
    );
}

#[tokio::test]
async fn test_create_folder_validation_codes() {
    let app = TestApp::new();
    let cases = [
        ("", "FileSystem.PATH_IS_EMPTY"),
        ("/test$1/", "FileSystem.INVALID_PATH"),
        ("/a/../b", "FileSystem.INVALID_PATH"),
        ("/1/2/3/4/5/6/7/8/9/10", "FileSystem.PATH_MAX_DEPTH"),
    ];

    for (path, code) in cases {
        let response = app
            .request(
                "POST",
                "/action/file-system/folders",
                Some(json!({ "path": path })),
                Some(active("1")),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "path {path:?}");
        assert_eq!(response.error_code(), Some(code), "path {path:?}");
    }

    let long = format!("/{}", "a".repeat(400));
    let response = app
        .request(
            "POST",
            "/action/file-system/folders",
            Some(json!({ "path": long })),
            Some(active("1")),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("FileSystem.PATH_MAX_LENGTH"));
}

#[tokio::test]
async fn test_upload_then_download() {
    let app = TestApp::new();

    let response = app
        .upload(
            active("1"),
            Some(json!({ "path": "/docs", "filename": "notes.txt" })),
            "ignored.bin",
            b"hello world",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let tree = response.result();
    assert_eq!(tree["count"], 1);
    assert_eq!(tree["size"], 11);
    assert_eq!(tree["folders"][0]["files"][0]["path"], "/docs/notes.txt");
    assert!(app.temp_is_empty());

    let download = app
        .download("/action/file-system", active("1"), "/docs/notes.txt")
        .await;

    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.body, b"hello world");
    assert_eq!(download.headers["content-type"], "text/plain");
    assert_eq!(
        download.headers["content-disposition"],
        "attachment; filename=notes.txt"
    );
}

#[tokio::test]
async fn test_upload_uses_part_name_and_rejects_duplicates() {
    let app = TestApp::new();

    let first = app.upload(active("1"), None, "data.csv", b"a,b\n1,2\n").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.result()["files"][0]["name"], "data.csv");

    let second = app.upload(active("1"), None, "data.csv", b"a,b\n").await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.error_code(), Some("FileSystem.PATH_ALREADY_EXISTS"));

    let replaced = app
        .upload(
            active("1"),
            Some(json!({ "overwrite": true })),
            "data.csv",
            b"a,b\n",
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.result()["size"], 4);
}

#[tokio::test]
async fn test_upload_over_quota() {
    let app = TestApp::with_file_system(|fs| fs.user_max_space = ByteSize::bytes(16));

    let fits = app.upload(active("1"), None, "a.bin", &[0u8; 10]).await;
    assert_eq!(fits.status, StatusCode::OK);

    let full = app.upload(active("1"), None, "b.bin", &[0u8; 7]).await;
    assert_eq!(full.status, StatusCode::INSUFFICIENT_STORAGE);
    assert_eq!(full.error_code(), Some("FileSystem.NOT_ENOUGH_SPACE"));
    assert!(!app.user_root("1").join("b.bin").exists());
    assert!(app.temp_is_empty());

    let exact = app.upload(active("1"), None, "c.bin", &[0u8; 6]).await;
    assert_eq!(exact.status, StatusCode::OK);

    let quota = app
        .request("GET", "/action/file-system/quota", None, Some(active("1")))
        .await;
    assert_eq!(quota.status, StatusCode::OK);
    assert_eq!(quota.result()["used_bytes"], 16);
    assert_eq!(quota.result()["available_bytes"], 0);
}

#[tokio::test]
async fn test_upload_onto_directory() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/action/file-system/folders",
        Some(json!({ "path": "/report" })),
        Some(active("1")),
    )
    .await;

    let response = app.upload(active("1"), None, "report", b"x").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("FileSystem.PATH_IS_DIRECTORY"));
}

#[tokio::test]
async fn test_download_errors() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/action/file-system/folders",
        Some(json!({ "path": "/dir" })),
        Some(active("1")),
    )
    .await;

    let missing = app
        .download("/action/file-system", active("1"), "/nope.txt")
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let directory = app.download("/action/file-system", active("1"), "/dir").await;
    assert_eq!(directory.status, StatusCode::BAD_REQUEST);

    let empty = app.download("/action/file-system", active("1"), "").await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_semantics() {
    let app = TestApp::new();
    app.upload(
        active("1"),
        Some(json!({ "path": "/full" })),
        "data.csv",
        b"1,2",
    )
    .await;
    app.request(
        "POST",
        "/action/file-system/folders",
        Some(json!({ "path": "/empty" })),
        Some(active("1")),
    )
    .await;

    let not_empty = app
        .request(
            "DELETE",
            "/action/file-system?path=/full",
            None,
            Some(active("1")),
        )
        .await;
    assert_eq!(not_empty.status, StatusCode::CONFLICT);
    assert_eq!(not_empty.error_code(), Some("FileSystem.PATH_NOT_EMPTY"));

    let missing = app
        .request(
            "DELETE",
            "/action/file-system?path=/ghost",
            None,
            Some(active("1")),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), Some("FileSystem.PATH_NOT_FOUND"));

    let root = app
        .request("DELETE", "/action/file-system?path=/", None, Some(active("1")))
        .await;
    assert_eq!(root.status, StatusCode::BAD_REQUEST);

    let file = app
        .request(
            "DELETE",
            "/action/file-system?path=/full/data.csv",
            None,
            Some(active("1")),
        )
        .await;
    assert_eq!(file.status, StatusCode::OK);
    assert_eq!(file.result()["count"], 0);

    let empty = app
        .request(
            "DELETE",
            "/action/file-system?path=/empty",
            None,
            Some(active("1")),
        )
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    let folders = empty.result()["folders"].as_array().unwrap().clone();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], "full");
}

#[tokio::test]
async fn test_users_do_not_see_each_other() {
    let app = TestApp::new();
    app.upload(active("alice"), None, "private.txt", b"secret")
        .await;

    let other = app
        .request("GET", "/action/file-system", None, Some(active("bob")))
        .await;
    assert_eq!(other.result()["count"], 0);

    let download = app
        .download("/action/file-system", active("bob"), "/private.txt")
        .await;
    assert_eq!(download.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_use_envelope() {
    let app = TestApp::new();
    let cases = [
        ("POST", "/action/file-system/folders", Some("application/json"), "{not json"),
        ("POST", "/action/file-system/folders", Some("application/json"), r#"{"path": 7}"#),
        ("POST", "/action/file-system/folders", None, r#"{"path": "/a"}"#),
        ("POST", "/action/file-system/files", Some("text/plain"), "raw bytes"),
        ("DELETE", "/action/file-system?path=/a&path=/b", None, ""),
        ("GET", "/action/file-system/files?path=/a&path=/b", None, ""),
    ];

    for (method, uri, content_type, body) in cases {
        let response = app
            .request_raw(method, uri, content_type, body, Some(active("1")))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {uri} {body}");
        assert_eq!(response.body["success"], false, "{method} {uri} {body}");
        assert!(response.result().is_null());
        assert_eq!(
            response.error_code(),
            Some("BasicMessageCode.VALIDATION"),
            "{method} {uri} {body}"
        );
        assert_eq!(response.body["messages"][0]["level"], "ERROR");
    }

    assert!(!app.user_root("1").join("a").exists());
}
