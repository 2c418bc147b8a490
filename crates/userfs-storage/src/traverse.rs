//! Bounded-depth directory traversal producing [`DirectoryEntry`] trees.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use userfs_core::FileSystemError;
use userfs_core::result::FsResult;
use userfs_entity::file::{DirectoryEntry, FileEntry};

/// Walks a physical directory and describes it as a tree.
pub trait DirectoryTraverse: Send + Sync + std::fmt::Debug + 'static {
    /// Describe `root` and its descendants.
    ///
    /// Directories more than `max_depth` levels below `root` are reported as
    /// leaf nodes without children. Directories named in `exclude` are skipped.
    fn traverse(&self, root: &Path, max_depth: usize, exclude: &[String]) -> FsResult<DirectoryEntry>;

    /// Total size of every regular file below `root`, at any depth.
    ///
    /// A missing root counts as empty.
    fn usage(&self, root: &Path) -> FsResult<u64>;
}

/// Run a traversal on the blocking thread pool.
pub async fn traverse_blocking(
    traverser: Arc<dyn DirectoryTraverse>,
    root: PathBuf,
    max_depth: usize,
    exclude: Arc<[String]>,
) -> FsResult<DirectoryEntry> {
    tokio::task::spawn_blocking(move || traverser.traverse(&root, max_depth, &exclude))
        .await
        .map_err(FileSystemError::io)?
}

/// Traverser over the local filesystem. Symbolic links are never followed.
#[derive(Debug, Clone, Default)]
pub struct DefaultDirectoryTraverser;

impl DefaultDirectoryTraverser {
    /// Create a new traverser.
    pub fn new() -> Self {
        Self
    }

    fn walk(
        &self,
        dir: &Path,
        node: &mut DirectoryEntry,
        remaining: usize,
        exclude: &[String],
    ) -> FsResult<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            let file_type = meta.file_type();

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %entry.path().display(), "Skipping entry with non UTF-8 name");
                continue;
            };
            let path = child_path(&node.path, &name);

            if file_type.is_symlink() {
                debug!(path = %entry.path().display(), "Skipping symbolic link");
            } else if file_type.is_dir() {
                if exclude.iter().any(|e| e == &name) {
                    continue;
                }
                let mut child = DirectoryEntry::new(name, path, modified(&meta));
                if remaining > 0 {
                    self.walk(&entry.path(), &mut child, remaining - 1, exclude)?;
                }
                node.add_folder(child);
            } else if file_type.is_file() {
                node.add_file(FileEntry {
                    name,
                    path,
                    size: meta.len(),
                    modified: modified(&meta),
                });
            }
        }

        node.sort();
        Ok(())
    }
}

impl DirectoryTraverse for DefaultDirectoryTraverser {
    fn traverse(
        &self,
        root: &Path,
        max_depth: usize,
        exclude: &[String],
    ) -> FsResult<DirectoryEntry> {
        if max_depth == 0 {
            return Err(FileSystemError::io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "the maximum depth must be a positive number",
            )));
        }

        let meta = fs::symlink_metadata(root)?;
        if !meta.is_dir() {
            return Err(FileSystemError::io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            )));
        }

        let mut tree = DirectoryEntry::root(modified(&meta));
        self.walk(root, &mut tree, max_depth, exclude)?;
        Ok(tree)
    }

    fn usage(&self, root: &Path) -> FsResult<u64> {
        match fs::symlink_metadata(root) {
            Ok(_) => Ok(disk_usage(root)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(FileSystemError::io(e)),
        }
    }
}

/// Sum the size of every regular file below `root`, at any depth.
fn disk_usage(root: &Path) -> std::io::Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            total += disk_usage(&entry.path())?;
        } else if file_type.is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

fn modified(meta: &fs::Metadata) -> DateTime<Utc> {
    timestamp(meta.modified())
}

/// Unavailable modification times are reported as the Unix epoch.
fn timestamp(time: std::io::Result<std::time::SystemTime>) -> DateTime<Utc> {
    match time {
        Ok(time) => DateTime::<Utc>::from(time),
        Err(e) => {
            debug!(error = %e, "Modification time unavailable");
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}
