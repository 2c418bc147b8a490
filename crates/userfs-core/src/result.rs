//! Convenience result type aliases.

use crate::error::{AppError, FileSystemError};

/// A specialized `Result` type for application-level operations.
pub type AppResult<T> = Result<T, AppError>;

/// A specialized `Result` type for user file system operations.
pub type FsResult<T> = Result<T, FileSystemError>;
