//! Request context carrying the calling user and their account status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use userfs_core::types::UserKey;
use userfs_entity::file::FilePathCommand;

/// Account status that grants access to the file system.
pub const ACTIVATED_STATUS: &str = "COMPLETED";

/// Context for the current request.
///
/// Built from the identity headers set by the fronting gateway and passed
/// into handlers so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The calling user.
    pub user: UserKey,
    /// Account activation status reported by the gateway.
    pub activation_status: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user: UserKey, activation_status: impl Into<String>) -> Self {
        Self {
            user,
            activation_status: activation_status.into(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the account has completed activation.
    pub fn is_activated(&self) -> bool {
        self.activation_status.eq_ignore_ascii_case(ACTIVATED_STATUS)
    }

    /// Builds a command addressing `path` in the caller's file system.
    pub fn path_command(&self, path: impl Into<String>) -> FilePathCommand {
        FilePathCommand::new(self.user.clone(), path)
    }
}
