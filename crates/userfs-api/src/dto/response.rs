//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Severity of a response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageLevel {
    /// Informational.
    Info,
    /// Warning.
    Warn,
    /// Error.
    Error,
}

/// A single message attached to a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Machine-readable code, e.g. `FileSystem.PATH_NOT_FOUND`.
    pub code: String,
    /// Severity.
    pub level: MessageLevel,
    /// Human-readable description.
    pub message: String,
}

impl Message {
    /// Creates an error message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            level: MessageLevel::Error,
            message: message.into(),
        }
    }
}

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Messages describing failures or warnings.
    pub messages: Vec<Message>,
    /// Response payload, `null` on failure.
    pub result: Option<T>,
}

impl<T: Serialize> RestResponse<T> {
    /// Creates a successful response.
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            messages: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed response.
    pub fn failure(messages: Vec<Message>) -> Self {
        Self {
            success: false,
            messages,
            result: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
