//! Local file I/O used by uploads and downloads.

use std::path::Path;
use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// A byte stream used for reading and writing file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Write `stream` to a new file at `path`, returning the number of bytes written.
///
/// The file is created exclusively, so `path` must not exist yet.
pub async fn write_stream(path: &Path, mut stream: ByteStream) -> std::io::Result<u64> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;

    let mut total_bytes = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total_bytes += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    file.sync_all().await?;

    debug!(path = %path.display(), bytes = total_bytes, "Wrote file from stream");
    Ok(total_bytes)
}

/// Move a file into place, replacing any existing file at `to`.
///
/// Falls back to copy and remove when `from` and `to` live on different
/// filesystems.
pub async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!(
                from = %from.display(),
                to = %to.display(),
                error = %e,
                "Rename failed, copying instead"
            );
            fs::copy(from, to).await?;
            fs::remove_file(from).await
        }
    }
}

/// Remove a file, logging instead of failing if it cannot be removed.
pub async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove file");
        }
    }
}

/// Open a file and return its byte stream.
pub async fn read(path: &Path) -> std::io::Result<ByteStream> {
    let file = fs::File::open(path).await?;
    let stream = ReaderStream::new(file);
    Ok(Box::pin(stream))
}
