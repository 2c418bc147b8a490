//! HTTP request handlers.

pub mod file_system;
pub mod health;
