//! # userfs-api
//!
//! HTTP API layer for the user file system built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, logging, compression),
//! the caller identity extractor, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
