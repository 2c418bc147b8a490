//! Commands accepted by the file manager.

use serde::{Deserialize, Serialize};
use userfs_core::types::UserKey;

/// A command addressing a single virtual path of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePathCommand {
    /// Owner of the file system.
    pub user: UserKey,
    /// Virtual path.
    pub path: String,
}

impl FilePathCommand {
    /// Create a new path command.
    pub fn new(user: UserKey, path: impl Into<String>) -> Self {
        Self {
            user,
            path: path.into(),
        }
    }
}

/// A command storing a new file in a user's file system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploadCommand {
    /// Owner of the file system.
    pub user: UserKey,
    /// Folder to upload into. Blank means the root.
    pub path: String,
    /// Name of the new file.
    pub filename: String,
    /// Declared size in bytes, checked against the quota before writing.
    pub size: u64,
    /// Replace an existing file with the same name.
    pub overwrite: bool,
    /// Free-form comment supplied by the client.
    pub comment: Option<String>,
}

impl FileUploadCommand {
    /// The virtual path of the uploaded file.
    pub fn target_path(&self) -> String {
        let folder = self.path.trim().trim_end_matches('/');
        format!("{folder}/{}", self.filename.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(path: &str, filename: &str) -> FileUploadCommand {
        FileUploadCommand {
            user: UserKey::new("1").unwrap(),
            path: path.to_string(),
            filename: filename.to_string(),
            size: 0,
            overwrite: false,
            comment: None,
        }
    }

    #[test]
    fn test_target_path() {
        assert_eq!(upload("", "a.txt").target_path(), "/a.txt");
        assert_eq!(upload("/", "a.txt").target_path(), "/a.txt");
        assert_eq!(upload("/docs/", "a.txt").target_path(), "/docs/a.txt");
        assert_eq!(upload("docs", "a.txt").target_path(), "docs/a.txt");
    }
}
