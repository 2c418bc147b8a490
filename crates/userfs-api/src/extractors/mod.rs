//! Custom Axum extractors.

pub mod auth;
pub mod request;

pub use auth::AccountUser;
pub use request::{ApiJson, ApiMultipart, ApiQuery};
