//! # userfs-service
//!
//! Service layer for the user file system. The [`FileManager`] orchestrates
//! path resolution, directory traversal, quota enforcement and local file
//! I/O to implement browse, upload, download and delete use cases.
//!
//! Services follow constructor injection: collaborators are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod file;

pub use context::RequestContext;
pub use file::{FileDownload, FileManager};
