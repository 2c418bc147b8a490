//! Per-user quota enforcement by full re-scan of the user root.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use userfs_core::FileSystemError;
use userfs_core::result::FsResult;
use userfs_core::types::ByteSize;
use userfs_entity::storage::StorageQuota;

use crate::traverse::DirectoryTraverse;

/// Checks prospective writes against a fixed per-user byte limit.
#[derive(Debug, Clone)]
pub struct QuotaEnforcer {
    limit: u64,
    traverser: Arc<dyn DirectoryTraverse>,
}

impl QuotaEnforcer {
    /// Create an enforcer that measures usage with `traverser`.
    pub fn new(limit: ByteSize, traverser: Arc<dyn DirectoryTraverse>) -> Self {
        Self {
            limit: limit.as_u64(),
            traverser,
        }
    }

    /// The configured limit in bytes.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Measure the current usage of `user_root`.
    ///
    /// A missing root counts as empty. Any other failure is an `IoError`.
    pub async fn usage(&self, user_root: &Path) -> FsResult<StorageQuota> {
        let root = user_root.to_path_buf();
        let traverser = Arc::clone(&self.traverser);
        let used = tokio::task::spawn_blocking(move || traverser.usage(&root))
            .await
            .map_err(FileSystemError::io)??;

        Ok(StorageQuota::new(self.limit, used))
    }

    /// Fail with `NotEnoughSpace` if `incoming` more bytes would not fit.
    ///
    /// Landing exactly on the limit is allowed.
    pub async fn check(&self, user_root: &Path, incoming: u64) -> FsResult<StorageQuota> {
        let quota = self.usage(user_root).await?;

        if quota.would_exceed(incoming) {
            debug!(
                used = quota.used_bytes,
                incoming,
                limit = self.limit,
                "Quota check failed"
            );
            return Err(FileSystemError::not_enough_space(
                "Insufficient storage space",
            ));
        }

        Ok(quota)
    }
}
