//! User file system server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use userfs_api::{AppState, build_app};
use userfs_core::config::AppConfig;
use userfs_core::error::AppError;
use userfs_core::result::AppResult;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> AppResult<AppConfig> {
    let config_dir = std::env::var("USERFS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("USERFS_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from_dir(&config_dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting user file system server v{}", env!("CARGO_PKG_VERSION"));

    create_data_directories(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app = build_app(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Listening on {addr}");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });
    let mut handle = tokio::spawn(server.into_future());

    // Resolves on the shutdown signal, or when the server stops on its own
    let _ = shutdown_rx.changed().await;

    let outcome = tokio::time::timeout(grace, &mut handle).await;
    match outcome {
        Ok(Ok(result)) => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        Ok(Err(e)) => {
            return Err(AppError::internal(format!("Server task failed: {e}")));
        }
        Err(_) => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Graceful shutdown timed out, aborting open connections"
            );
            handle.abort();
        }
    }

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Create the user data and upload staging directories
async fn create_data_directories(config: &AppConfig) -> AppResult<()> {
    let dirs = [&config.file_system.data_dir, &config.file_system.temp_dir];

    for dir in dirs {
        match tokio::fs::create_dir_all(dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(AppError::internal(format!(
                    "Failed to create dir '{}': {e}",
                    dir.display()
                )));
            }
        }
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
