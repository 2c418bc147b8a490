//! Unified error types for the user file system.
//!
//! File system operations report a [`FileSystemError`] carrying one of the
//! closed [`FileSystemMessageCode`] values. Everything that crosses the HTTP
//! boundary is an [`AppError`], which wraps file system errors and the
//! handful of ambient failures (identity, configuration, internal).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of file system error codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileSystemMessageCode {
    /// A path or file name was required but blank.
    PathIsEmpty,
    /// The path contains forbidden characters or parent traversal.
    InvalidPath,
    /// The path has more segments than allowed.
    PathMaxDepth,
    /// The path is longer than allowed.
    PathMaxLength,
    /// The target already exists.
    PathAlreadyExists,
    /// The target does not exist.
    PathNotFound,
    /// The target directory is not empty.
    PathNotEmpty,
    /// The target is a directory where a file was expected.
    PathIsDirectory,
    /// The operation would exceed the user's quota.
    NotEnoughSpace,
    /// Any other I/O failure.
    IoError,
}

impl FileSystemMessageCode {
    /// The wire key of this code, e.g. `FileSystem.PATH_NOT_FOUND`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PathIsEmpty => "FileSystem.PATH_IS_EMPTY",
            Self::InvalidPath => "FileSystem.INVALID_PATH",
            Self::PathMaxDepth => "FileSystem.PATH_MAX_DEPTH",
            Self::PathMaxLength => "FileSystem.PATH_MAX_LENGTH",
            Self::PathAlreadyExists => "FileSystem.PATH_ALREADY_EXISTS",
            Self::PathNotFound => "FileSystem.PATH_NOT_FOUND",
            Self::PathNotEmpty => "FileSystem.PATH_NOT_EMPTY",
            Self::PathIsDirectory => "FileSystem.PATH_IS_DIRECTORY",
            Self::NotEnoughSpace => "FileSystem.NOT_ENOUGH_SPACE",
            Self::IoError => "FileSystem.IO_ERROR",
        }
    }

    /// Whether the code signals a rejected input rather than a state conflict.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::PathIsEmpty
                | Self::InvalidPath
                | Self::PathMaxDepth
                | Self::PathMaxLength
                | Self::PathIsDirectory
        )
    }
}

impl fmt::Display for FileSystemMessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned by every user file system operation.
///
/// `message` is safe to show to clients. `source` keeps the underlying cause
/// for logging and is never serialized.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct FileSystemError {
    /// The error code.
    pub code: FileSystemMessageCode,
    /// A client-safe message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FileSystemError {
    /// Create a new file system error.
    pub fn new(code: FileSystemMessageCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an unexpected failure as `IoError` with a generic message.
    pub fn io(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            code: FileSystemMessageCode::IoError,
            message: "An unknown error has occurred".to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a path-is-empty error.
    pub fn path_is_empty(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathIsEmpty, message)
    }

    /// Create an invalid-path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::InvalidPath, message)
    }

    /// Create a path-max-depth error.
    pub fn path_max_depth(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathMaxDepth, message)
    }

    /// Create a path-max-length error.
    pub fn path_max_length(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathMaxLength, message)
    }

    /// Create a path-already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathAlreadyExists, message)
    }

    /// Create a path-not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathNotFound, message)
    }

    /// Create a path-not-empty error.
    pub fn not_empty(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathNotEmpty, message)
    }

    /// Create a path-is-directory error.
    pub fn is_directory(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::PathIsDirectory, message)
    }

    /// Create a not-enough-space error.
    pub fn not_enough_space(message: impl Into<String>) -> Self {
        Self::new(FileSystemMessageCode::NotEnoughSpace, message)
    }
}

impl From<std::io::Error> for FileSystemError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err)
    }
}

/// Top-level error kind categorization used at the application boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No caller identity was supplied.
    Authentication,
    /// The caller may not use the file system (e.g. account not activated).
    Authorization,
    /// Request input could not be parsed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
    /// A user file system operation failed.
    FileSystem(FileSystemMessageCode),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::FileSystem(code) => write!(f, "{code}"),
        }
    }
}

/// The unified application error.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// The file system code, if this error came from a file system operation.
    pub fn file_system_code(&self) -> Option<FileSystemMessageCode> {
        match self.kind {
            ErrorKind::FileSystem(code) => Some(code),
            _ => None,
        }
    }
}

impl From<FileSystemError> for AppError {
    fn from(err: FileSystemError) -> Self {
        Self {
            kind: ErrorKind::FileSystem(err.code),
            message: err.message,
            source: err.source,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
