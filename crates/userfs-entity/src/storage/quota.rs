//! Storage quota value object.

use serde::{Deserialize, Serialize};

/// Quota information for one user's file system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageQuota {
    /// Total quota in bytes.
    pub limit_bytes: u64,
    /// Currently used bytes.
    pub used_bytes: u64,
    /// Bytes still available.
    pub available_bytes: u64,
    /// Usage percentage (0.0 - 100.0, may exceed 100 if the limit was lowered).
    pub usage_percent: f64,
}

impl StorageQuota {
    /// Create a quota from limit and used values.
    pub fn new(limit_bytes: u64, used_bytes: u64) -> Self {
        let usage_percent = if limit_bytes == 0 {
            0.0
        } else {
            (used_bytes as f64 / limit_bytes as f64) * 100.0
        };

        Self {
            limit_bytes,
            used_bytes,
            available_bytes: limit_bytes.saturating_sub(used_bytes),
            usage_percent,
        }
    }

    /// Check if the quota is exceeded.
    pub fn is_exceeded(&self) -> bool {
        self.used_bytes > self.limit_bytes
    }

    /// Check if adding the given number of bytes would exceed the quota.
    pub fn would_exceed(&self, additional_bytes: u64) -> bool {
        self.used_bytes.saturating_add(additional_bytes) > self.limit_bytes
    }
}
