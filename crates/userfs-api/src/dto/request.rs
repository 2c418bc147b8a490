//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /action/file-system/folders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Virtual path of the new folder.
    #[serde(default)]
    pub path: String,
}

/// `?path=` query parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathQuery {
    /// Virtual path.
    #[serde(default)]
    pub path: String,
}

/// JSON `data` part of a multipart upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadFileData {
    /// Folder to upload into.
    #[serde(default)]
    pub path: String,
    /// File name; defaults to the name of the uploaded part.
    #[serde(default)]
    pub filename: Option<String>,
    /// Replace an existing file.
    #[serde(default)]
    pub overwrite: bool,
    /// Free-form comment.
    #[serde(default)]
    pub comment: Option<String>,
}
