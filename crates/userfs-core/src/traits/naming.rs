//! Naming strategy mapping user keys and virtual paths to physical paths.

use std::path::{Path, PathBuf};

use crate::result::FsResult;
use crate::types::UserKey;

/// A virtual path together with its physical location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized virtual path, always starting with `/`.
    pub virtual_path: String,
    /// Absolute physical path inside the user root.
    pub physical: PathBuf,
}

impl ResolvedPath {
    /// Whether this is the user root itself.
    pub fn is_root(&self) -> bool {
        self.virtual_path == "/"
    }

    /// The last segment of the virtual path, or `/` for the root.
    pub fn file_name(&self) -> &str {
        self.virtual_path
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or("/")
    }
}

/// Maps users to their private directory and virtual paths into it.
///
/// Implementations must guarantee that every path they return is the user
/// root or one of its descendants.
pub trait UserFileNamingStrategy: Send + Sync + std::fmt::Debug + 'static {
    /// The user's root directory. Does not touch the filesystem.
    fn user_dir(&self, user: &UserKey) -> PathBuf;

    /// The user's root directory, created when `create_if_missing` is set.
    fn get_user_dir(&self, user: &UserKey, create_if_missing: bool) -> FsResult<PathBuf>;

    /// Validate `virtual_path` and resolve it inside the user's root.
    fn resolve(&self, user: &UserKey, virtual_path: &str) -> FsResult<ResolvedPath>;

    /// Whether `path` lies inside the user's root.
    fn is_confined(&self, user: &UserKey, path: &Path) -> bool {
        path.starts_with(self.user_dir(user))
    }
}
