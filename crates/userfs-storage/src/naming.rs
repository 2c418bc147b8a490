//! Default user file naming strategy.
//!
//! Every user owns `<data_dir>/<user key>`. Virtual paths are validated by
//! [`PathRules`] and joined segment by segment under that root, so the result
//! can never escape it. Files can also be addressed with `user-data` URIs of
//! the form `user-data://<user key>/<virtual path>`.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use userfs_core::FileSystemError;
use userfs_core::config::FileSystemConfig;
use userfs_core::result::FsResult;
use userfs_core::traits::{ResolvedPath, UserFileNamingStrategy};
use userfs_core::types::UserKey;

use crate::path::PathRules;

/// URI scheme for files inside user roots.
pub const USER_DATA_SCHEME: &str = "user-data";

/// Resolves users and virtual paths below a single data directory.
#[derive(Debug, Clone)]
pub struct DefaultUserFileNamingStrategy {
    data_dir: PathBuf,
    rules: PathRules,
}

impl DefaultUserFileNamingStrategy {
    /// Create a strategy rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>, rules: PathRules) -> Self {
        Self {
            data_dir: data_dir.into(),
            rules,
        }
    }

    /// Create a strategy from the file system configuration.
    pub fn from_config(config: &FileSystemConfig) -> Self {
        Self::new(config.data_dir.clone(), PathRules::from_config(config))
    }

    /// The directory containing every user root.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The path validation rules in use.
    pub fn rules(&self) -> &PathRules {
        &self.rules
    }

    /// Build the `user-data` URI of a virtual path.
    pub fn to_uri(&self, user: &UserKey, virtual_path: &str) -> FsResult<String> {
        let normalized = self.rules.normalize(virtual_path)?;
        Ok(format!("{USER_DATA_SCHEME}://{user}{normalized}"))
    }

    /// Resolve a `user-data` URI to its owner and physical location.
    pub fn resolve_uri(&self, uri: &str) -> FsResult<(UserKey, ResolvedPath)> {
        let rest = uri
            .strip_prefix(USER_DATA_SCHEME)
            .and_then(|r| r.strip_prefix("://"))
            .ok_or_else(|| {
                FileSystemError::invalid_path(format!("Expected a {USER_DATA_SCHEME} URI"))
            })?;

        let (user, path) = match rest.split_once('/') {
            Some((user, path)) => (user, path),
            None => (rest, ""),
        };

        let user = UserKey::new(user)?;
        let resolved = self.resolve(&user, path)?;
        Ok((user, resolved))
    }

    /// Build the `user-data` URI of a physical path inside the data directory.
    pub fn uri_from_physical(&self, path: &Path) -> FsResult<String> {
        let relative = path.strip_prefix(&self.data_dir).map_err(|_| {
            FileSystemError::invalid_path("The path is outside the user data directory")
        })?;

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str().ok_or_else(|| {
                    FileSystemError::invalid_path("The path is not valid UTF-8")
                })?),
                _ => {
                    return Err(FileSystemError::invalid_path(
                        "The path must be normalized",
                    ));
                }
            }
        }

        let Some((user, rest)) = parts.split_first() else {
            return Err(FileSystemError::invalid_path("The relative path is too short"));
        };
        if rest.is_empty() {
            return Err(FileSystemError::invalid_path("The relative path is too short"));
        }

        let user = UserKey::new(*user)?;
        self.to_uri(&user, &rest.join("/"))
    }
}

impl UserFileNamingStrategy for DefaultUserFileNamingStrategy {
    fn user_dir(&self, user: &UserKey) -> PathBuf {
        self.data_dir.join(user.as_str())
    }

    fn get_user_dir(&self, user: &UserKey, create_if_missing: bool) -> FsResult<PathBuf> {
        let dir = self.user_dir(user);

        if create_if_missing && !dir.exists() {
            match std::fs::create_dir_all(&dir) {
                Ok(()) => debug!(user = %user, "Created user directory"),
                // Another request may have created it concurrently
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(FileSystemError::io(e)),
            }
        }

        Ok(dir)
    }

    fn resolve(&self, user: &UserKey, virtual_path: &str) -> FsResult<ResolvedPath> {
        let segments = self.rules.segments(virtual_path)?;

        let mut physical = self.user_dir(user);
        physical.extend(segments.iter());

        Ok(ResolvedPath {
            virtual_path: format!("/{}", segments.join("/")),
            physical,
        })
    }
}
