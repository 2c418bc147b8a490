//! Directory tree nodes returned by browse operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A regular file inside a user's directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name.
    pub name: String,
    /// Virtual path relative to the user root.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// A directory inside a user's directory tree.
///
/// `count` and `size` aggregate every file listed below this node, at any
/// depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Directory name, `/` for the root.
    pub name: String,
    /// Virtual path relative to the user root.
    pub path: String,
    /// Last modification time of the directory itself.
    pub modified: DateTime<Utc>,
    /// Total number of descendant files.
    pub count: u64,
    /// Total size of descendant files in bytes.
    pub size: u64,
    /// Files directly inside this directory, sorted by name.
    pub files: Vec<FileEntry>,
    /// Directories directly inside this directory, sorted by name.
    pub folders: Vec<DirectoryEntry>,
}

impl DirectoryEntry {
    /// Create an empty directory node.
    pub fn new(name: impl Into<String>, path: impl Into<String>, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            modified,
            count: 0,
            size: 0,
            files: Vec::new(),
            folders: Vec::new(),
        }
    }

    /// Create the root node of a user's tree.
    pub fn root(modified: DateTime<Utc>) -> Self {
        Self::new("/", "/", modified)
    }

    /// Add a file and account for it in the aggregates.
    pub fn add_file(&mut self, file: FileEntry) {
        self.count += 1;
        self.size += file.size;
        self.files.push(file);
    }

    /// Add a subdirectory and fold its aggregates into this node.
    pub fn add_folder(&mut self, folder: DirectoryEntry) {
        self.count += folder.count;
        self.size += folder.size;
        self.folders.push(folder);
    }

    /// Sort direct children by name.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.name.cmp(&b.name));
        self.folders.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Whether this directory has no children at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Find a directory node by its virtual path.
    pub fn find_folder(&self, path: &str) -> Option<&DirectoryEntry> {
        if self.path == path {
            return Some(self);
        }
        self.folders.iter().find_map(|f| f.find_folder(path))
    }

    /// Find a file node by its virtual path.
    pub fn find_file(&self, path: &str) -> Option<&FileEntry> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .or_else(|| self.folders.iter().find_map(|f| f.find_file(path)))
    }
}
