//! File upload: validate, check quota, stage in the temp directory, move in place.

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use userfs_core::FileSystemError;
use userfs_core::result::FsResult;
use userfs_entity::file::{DirectoryEntry, FileUploadCommand};
use userfs_storage::ByteStream;
use userfs_storage::local;

use super::manager::{EntryKind, FileManager, log_failure};

impl FileManager {
    /// Stores `stream` as `cmd.path/cmd.filename` in the user's file system.
    ///
    /// The declared size is checked against the quota before anything is
    /// written. Bytes are staged in the temp directory and only moved into
    /// the user root once fully received, so a failed upload leaves no
    /// partial file behind.
    pub async fn upload_file(
        &self,
        cmd: FileUploadCommand,
        stream: ByteStream,
    ) -> FsResult<DirectoryEntry> {
        self.upload_inner(&cmd, stream)
            .await
            .map_err(|e| log_failure("upload", &cmd.user, &cmd.target_path(), e))
    }

    async fn upload_inner(
        &self,
        cmd: &FileUploadCommand,
        stream: ByteStream,
    ) -> FsResult<DirectoryEntry> {
        let filename = cmd.filename.trim();
        if filename.is_empty() {
            return Err(FileSystemError::path_is_empty("File name is not set"));
        }
        if filename.contains('/') {
            return Err(FileSystemError::invalid_path(
                "File name must not contain path separators",
            ));
        }

        let target = self.naming.resolve(&cmd.user, &cmd.target_path())?;
        let root = self.naming.get_user_dir(&cmd.user, true)?;

        let existing = self.inspect(&root, &target).await?;
        if existing == EntryKind::Directory {
            return Err(FileSystemError::is_directory("File is a directory"));
        }

        self.quota.check(&root, cmd.size).await?;

        if existing == EntryKind::File && !cmd.overwrite {
            return Err(FileSystemError::already_exists(
                "File with the same name already exists",
            ));
        }

        fs::create_dir_all(&self.temp_dir).await?;
        let staged = self.temp_dir.join(format!("upload-{}", Uuid::new_v4()));

        let result = self.store(cmd, stream, &staged, &root, &target.physical).await;
        if result.is_err() {
            local::remove_quietly(&staged).await;
        }
        let written = result?;

        info!(
            user = %cmd.user,
            path = %target.virtual_path,
            bytes = written,
            overwrite = cmd.overwrite,
            comment = cmd.comment.as_deref(),
            "Uploaded file"
        );

        self.browse(&cmd.user).await
    }

    async fn store(
        &self,
        cmd: &FileUploadCommand,
        stream: ByteStream,
        staged: &Path,
        root: &Path,
        target: &Path,
    ) -> FsResult<u64> {
        let written = local::write_stream(staged, stream).await?;
        debug!(staged = %staged.display(), bytes = written, "Staged upload");

        // The declared size is advisory; never let more bytes in than fit
        if written > cmd.size {
            self.quota.check(root, written).await?;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        local::move_file(staged, target).await?;

        Ok(written)
    }
}
