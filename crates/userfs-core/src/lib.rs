//! # userfs-core
//!
//! Core crate for the user file system service. Contains configuration
//! schemas, typed identifiers, size parsing, the path naming trait, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, FileSystemError, FileSystemMessageCode};
pub use result::{AppResult, FsResult};
