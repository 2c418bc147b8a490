//! Route definitions for the user file system HTTP API.
//!
//! Browser-facing routes live under `/action/file-system`; the read-only
//! subset exposed to API clients lives under `/api/file-system`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and the JSON `data` part on top of the file.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state
        .config
        .file_system
        .user_max_space
        .as_u64()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let max_upload = usize::try_from(max_upload).unwrap_or(usize::MAX);

    Router::new()
        .merge(file_system_routes())
        .merge(gateway_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}

/// Browse, folder, upload, download, delete and quota endpoints
fn file_system_routes() -> Router<AppState> {
    use handlers::file_system as fs;

    Router::new()
        .route("/action/file-system", get(fs::browse).delete(fs::delete_path))
        .route("/action/file-system/folders", post(fs::create_folder))
        .route(
            "/action/file-system/files",
            get(fs::download_file).post(fs::upload_file),
        )
        .route("/action/file-system/quota", get(fs::quota))
}

/// Read-only endpoints for API clients
fn gateway_routes() -> Router<AppState> {
    use handlers::file_system as fs;

    Router::new()
        .route("/api/file-system", get(fs::browse))
        .route("/api/file-system/files", get(fs::download_file))
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
