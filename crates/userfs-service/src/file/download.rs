//! File download: resolve, open and describe a file for streaming.

use userfs_core::result::FsResult;
use userfs_entity::file::FilePathCommand;
use userfs_storage::{ByteStream, local, mime};

use super::manager::{FileManager, log_failure};

/// An opened file ready to be streamed to a client.
pub struct FileDownload {
    /// File contents. The file stays open until the stream is dropped.
    pub stream: ByteStream,
    /// Suggested file name for `Content-Disposition`.
    pub filename: String,
    /// Detected content type.
    pub content_type: String,
    /// File length, only reported for small files.
    pub content_length: Option<u64>,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish()
    }
}

impl FileManager {
    /// Opens a file of the user's file system for download.
    pub async fn download(&self, cmd: FilePathCommand) -> FsResult<FileDownload> {
        self.download_inner(&cmd)
            .await
            .map_err(|e| log_failure("download", &cmd.user, &cmd.path, e))
    }

    async fn download_inner(&self, cmd: &FilePathCommand) -> FsResult<FileDownload> {
        let resolved = self.resolve_file(cmd).await?;
        let length = tokio::fs::metadata(&resolved.physical).await?.len();
        let content_type = mime::detect(&resolved.physical).await;
        let stream = local::read(&resolved.physical).await?;

        Ok(FileDownload {
            stream,
            filename: resolved.file_name().to_string(),
            content_type: content_type.to_string(),
            content_length: (length < self.download_length_threshold).then_some(length),
        })
    }
}
