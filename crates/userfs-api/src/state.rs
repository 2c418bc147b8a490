//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use userfs_core::config::AppConfig;
use userfs_service::file::FileManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User file system operations
    pub file_manager: Arc<FileManager>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn new(config: AppConfig) -> Self {
        let file_manager = Arc::new(FileManager::new(&config.file_system));
        Self {
            config: Arc::new(config),
            file_manager,
        }
    }
}
