//! File manager: the single entry point for user file system operations.
//!
//! Every operation validates its virtual path before touching the
//! filesystem and returns a freshly traversed tree of the user's root.
//! Unexpected failures surface as `IoError` with a generic message; the
//! underlying cause is only logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{error, info};

use userfs_core::config::FileSystemConfig;
use userfs_core::result::FsResult;
use userfs_core::traits::{ResolvedPath, UserFileNamingStrategy};
use userfs_core::types::UserKey;
use userfs_core::{FileSystemError, FileSystemMessageCode};
use userfs_entity::file::{DirectoryEntry, FilePathCommand};
use userfs_entity::storage::StorageQuota;
use userfs_storage::traverse::traverse_blocking;
use userfs_storage::{
    DefaultDirectoryTraverser, DefaultUserFileNamingStrategy, DirectoryTraverse, QuotaEnforcer,
};

/// What a virtual path currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// Nothing exists at the path.
    Missing,
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// Orchestrates naming, traversal, quota and storage for all users.
#[derive(Clone)]
pub struct FileManager {
    /// Maps users and virtual paths to physical paths.
    pub(crate) naming: Arc<dyn UserFileNamingStrategy>,
    /// Builds directory trees.
    pub(crate) traverser: Arc<dyn DirectoryTraverse>,
    /// Per-user space limit.
    pub(crate) quota: QuotaEnforcer,
    /// Staging directory for uploads.
    pub(crate) temp_dir: PathBuf,
    /// Maximum depth listed by browse.
    pub(crate) traverse_depth: usize,
    /// Directory names hidden from listings.
    pub(crate) exclude: Arc<[String]>,
    /// Downloads below this size report their length.
    pub(crate) download_length_threshold: u64,
}

impl std::fmt::Debug for FileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileManager")
            .field("temp_dir", &self.temp_dir)
            .field("quota", &self.quota)
            .finish()
    }
}

impl FileManager {
    /// Creates a file manager with the default naming strategy and traverser.
    pub fn new(config: &FileSystemConfig) -> Self {
        Self::with_components(
            Arc::new(DefaultUserFileNamingStrategy::from_config(config)),
            Arc::new(DefaultDirectoryTraverser::new()),
            config,
        )
    }

    /// Creates a file manager with explicit collaborators.
    pub fn with_components(
        naming: Arc<dyn UserFileNamingStrategy>,
        traverser: Arc<dyn DirectoryTraverse>,
        config: &FileSystemConfig,
    ) -> Self {
        Self {
            naming,
            quota: QuotaEnforcer::new(config.user_max_space, Arc::clone(&traverser)),
            traverser,
            temp_dir: config.temp_dir.clone(),
            traverse_depth: config.traverse_depth,
            exclude: Arc::from(config.exclude.clone()),
            download_length_threshold: config.download_length_threshold,
        }
    }

    /// Lists the user's whole file system, creating the root if needed.
    pub async fn browse(&self, user: &UserKey) -> FsResult<DirectoryEntry> {
        self.browse_inner(user)
            .await
            .map_err(|e| log_failure("browse", user, "/", e))
    }

    /// Creates a folder and any missing parents.
    pub async fn create_folder(&self, cmd: FilePathCommand) -> FsResult<DirectoryEntry> {
        self.create_folder_inner(&cmd)
            .await
            .map_err(|e| log_failure("create folder", &cmd.user, &cmd.path, e))
    }

    /// Deletes a file or an empty folder.
    pub async fn delete_path(&self, cmd: FilePathCommand) -> FsResult<DirectoryEntry> {
        self.delete_path_inner(&cmd)
            .await
            .map_err(|e| log_failure("delete", &cmd.user, &cmd.path, e))
    }

    /// Resolves a virtual path to the physical path of an existing file.
    pub async fn resolve_file_path(&self, cmd: FilePathCommand) -> FsResult<PathBuf> {
        self.resolve_file(&cmd)
            .await
            .map(|resolved| resolved.physical)
            .map_err(|e| log_failure("resolve", &cmd.user, &cmd.path, e))
    }

    /// Reports the user's current space usage.
    pub async fn quota(&self, user: &UserKey) -> FsResult<StorageQuota> {
        self.quota_inner(user)
            .await
            .map_err(|e| log_failure("quota", user, "/", e))
    }

    async fn browse_inner(&self, user: &UserKey) -> FsResult<DirectoryEntry> {
        let root = self.naming.get_user_dir(user, true)?;
        traverse_blocking(
            Arc::clone(&self.traverser),
            root,
            self.traverse_depth,
            Arc::clone(&self.exclude),
        )
        .await
    }

    async fn quota_inner(&self, user: &UserKey) -> FsResult<StorageQuota> {
        let root = self.naming.get_user_dir(user, true)?;
        self.quota.usage(&root).await
    }

    async fn create_folder_inner(&self, cmd: &FilePathCommand) -> FsResult<DirectoryEntry> {
        if cmd.path.trim().is_empty() {
            return Err(FileSystemError::path_is_empty("A path is required"));
        }

        let target = self.naming.resolve(&cmd.user, &cmd.path)?;
        let root = self.naming.get_user_dir(&cmd.user, true)?;

        if self.inspect(&root, &target).await? != EntryKind::Missing {
            return Err(FileSystemError::already_exists(format!(
                "Directory [{}] already exists",
                target.virtual_path
            )));
        }

        fs::create_dir_all(&target.physical).await?;
        info!(user = %cmd.user, path = %target.virtual_path, "Created folder");

        self.browse_inner(&cmd.user).await
    }

    async fn delete_path_inner(&self, cmd: &FilePathCommand) -> FsResult<DirectoryEntry> {
        if cmd.path.trim().is_empty() {
            return Err(FileSystemError::path_is_empty("A path is required"));
        }

        let target = self.naming.resolve(&cmd.user, &cmd.path)?;
        if target.is_root() {
            return Err(FileSystemError::invalid_path(
                "The root directory cannot be deleted",
            ));
        }
        let root = self.naming.get_user_dir(&cmd.user, true)?;

        match self.inspect(&root, &target).await? {
            EntryKind::Missing => {
                return Err(FileSystemError::not_found("Path does not exist"));
            }
            EntryKind::Directory => {
                let mut entries = fs::read_dir(&target.physical).await?;
                if entries.next_entry().await?.is_some() {
                    return Err(FileSystemError::not_empty("Path is not empty"));
                }
                fs::remove_dir(&target.physical).await?;
            }
            EntryKind::File => fs::remove_file(&target.physical).await?,
        }
        info!(user = %cmd.user, path = %target.virtual_path, "Deleted path");

        self.browse_inner(&cmd.user).await
    }

    pub(crate) async fn resolve_file(&self, cmd: &FilePathCommand) -> FsResult<ResolvedPath> {
        if cmd.path.trim().is_empty() {
            return Err(FileSystemError::path_is_empty(
                "A path to the file is required",
            ));
        }

        let target = self.naming.resolve(&cmd.user, &cmd.path)?;
        let root = self.naming.user_dir(&cmd.user);

        match self.inspect(&root, &target).await? {
            EntryKind::Missing => Err(FileSystemError::not_found("File does not exist")),
            EntryKind::Directory => Err(FileSystemError::is_directory("Path is not a file")),
            EntryKind::File => Ok(target),
        }
    }

    /// Classify what `target` points at without following symbolic links.
    ///
    /// A symbolic link anywhere between the user root and the target is
    /// refused with `InvalidPath`.
    pub(crate) async fn inspect(&self, root: &Path, target: &ResolvedPath) -> FsResult<EntryKind> {
        let relative = target
            .physical
            .strip_prefix(root)
            .map_err(|_| FileSystemError::invalid_path("Path is outside the user directory"))?;

        let mut current = root.to_path_buf();
        let mut kind = match metadata(&current).await? {
            Some(meta) if meta.is_dir() => EntryKind::Directory,
            _ => return Ok(EntryKind::Missing),
        };

        for component in relative.components() {
            if kind != EntryKind::Directory {
                // A file cannot have children
                return Ok(EntryKind::Missing);
            }
            current.push(component);
            kind = match metadata(&current).await? {
                None => return Ok(EntryKind::Missing),
                Some(meta) if meta.file_type().is_symlink() => {
                    return Err(FileSystemError::invalid_path(
                        "Symbolic links are not supported",
                    ));
                }
                Some(meta) if meta.is_dir() => EntryKind::Directory,
                Some(meta) if meta.is_file() => EntryKind::File,
                Some(_) => {
                    return Err(FileSystemError::invalid_path("Unsupported file type"));
                }
            };
        }

        Ok(kind)
    }
}

/// `symlink_metadata` that maps a missing entry to `None`.
async fn metadata(path: &Path) -> FsResult<Option<std::fs::Metadata>> {
    match fs::symlink_metadata(path).await {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FileSystemError::io(e)),
    }
}

/// Log unexpected failures with their cause before they reach the client.
pub(crate) fn log_failure(
    operation: &str,
    user: &UserKey,
    path: &str,
    err: FileSystemError,
) -> FileSystemError {
    if err.code == FileSystemMessageCode::IoError {
        error!(
            user = %user,
            path,
            cause = ?err.source,
            "[FileSystem] Failed to {operation}"
        );
    }
    err
}
