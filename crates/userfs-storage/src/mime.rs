//! Content type detection for downloads.

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::debug;

/// Content type used when nothing better is known.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Bytes read from the start of a file for magic-number detection.
const SNIFF_LEN: u64 = 8192;

/// Guess a MIME type from a file name extension.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    if ext.eq_ignore_ascii_case("geojson") {
        return Some("application/geo+json");
    }
    mime_guess::from_ext(ext).first_raw()
}

/// Guess a MIME type from the first bytes of a file.
pub fn sniff(head: &[u8]) -> Option<&'static str> {
    infer::get(head).map(|kind| kind.mime_type())
}

/// Detect the content type of a file: extension first, then magic bytes.
///
/// Falls back to [`DEFAULT_CONTENT_TYPE`], including when the file cannot be read.
pub async fn detect(path: &Path) -> &'static str {
    if let Some(mime) = mime_from_path(path) {
        return mime;
    }

    let mut head = Vec::new();
    if let Ok(file) = tokio::fs::File::open(path).await {
        if let Err(e) = file.take(SNIFF_LEN).read_to_end(&mut head).await {
            debug!(path = %path.display(), error = %e, "Failed to read file header");
        }
    }

    sniff(&head).unwrap_or(DEFAULT_CONTENT_TYPE)
}
