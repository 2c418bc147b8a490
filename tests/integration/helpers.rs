//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use userfs_api::{AppState, build_app};
use userfs_core::config::{AppConfig, FileSystemConfig};

/// Multipart boundary used by upload requests
const BOUNDARY: &str = "----userfs-test-boundary";

/// Caller identity sent through the gateway headers
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    /// User key
    pub key: &'a str,
    /// Account activation status
    pub status: &'a str,
}

/// An activated caller
pub fn active(key: &str) -> Caller<'_> {
    Caller {
        key,
        status: "COMPLETED",
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Backing directory, removed on drop
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application with default limits
    pub fn new() -> Self {
        Self::with_file_system(|_| {})
    }

    /// Create a test application after adjusting the file system config
    pub fn with_file_system(adjust: impl FnOnce(&mut FileSystemConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.file_system = FileSystemConfig::with_base_dir(dir.path());
        adjust(&mut config.file_system);
        config.file_system.validate().expect("Invalid test config");

        std::fs::create_dir_all(&config.file_system.data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(&config.file_system.temp_dir).expect("Failed to create temp dir");

        let router = build_app(AppState::new(config.clone()));

        Self {
            router,
            config,
            dir,
        }
    }

    /// Physical root of a user
    pub fn user_root(&self, key: &str) -> std::path::PathBuf {
        self.config.file_system.data_dir.join(key)
    }

    /// Whether the upload staging directory is empty
    pub fn temp_is_empty(&self) -> bool {
        std::fs::read_dir(&self.config.file_system.temp_dir)
            .expect("Failed to read temp dir")
            .next()
            .is_none()
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        caller: Option<Caller<'_>>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = with_caller(Request::builder().method(method).uri(path), caller)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send `body` verbatim with an optional content type
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
        body: &str,
        caller: Option<Caller<'_>>,
    ) -> TestResponse {
        let mut builder = with_caller(Request::builder().method(method).uri(path), caller);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let req = builder
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `content` as a multipart request with an optional JSON `data` part
    pub async fn upload(
        &self,
        caller: Caller<'_>,
        data: Option<Value>,
        part_filename: &str,
        content: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        if let Some(data) = data {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"data\"\r\n\
                     Content-Type: application/json\r\n\r\n{data}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{part_filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = with_caller(
            Request::builder()
                .method("POST")
                .uri("/action/file-system/files"),
            Some(caller),
        )
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Download a file, returning the raw response
    pub async fn download(&self, prefix: &str, caller: Caller<'_>, path: &str) -> RawResponse {
        let req = with_caller(
            Request::builder()
                .method("GET")
                .uri(format!("{prefix}/files?path={path}")),
            Some(caller),
        )
        .body(Body::empty())
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();

        RawResponse {
            status,
            headers,
            body,
        }
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

fn with_caller(
    mut builder: axum::http::request::Builder,
    caller: Option<Caller<'_>>,
) -> axum::http::request::Builder {
    if let Some(caller) = caller {
        builder = builder
            .header("X-User-Key", caller.key)
            .header("X-Account-Status", caller.status);
    }
    builder
}

/// Response from a JSON test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The code of the first error message, if any
    pub fn error_code(&self) -> Option<&str> {
        self.body["messages"][0]["code"].as_str()
    }

    /// The `result` payload
    pub fn result(&self) -> &Value {
        &self.body["result"]
    }
}

/// Raw response from a download request
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}
