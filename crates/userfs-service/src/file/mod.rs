//! User file system services: browse, folders, upload, download, delete.

pub mod download;
pub mod manager;
pub mod upload;

pub use download::FileDownload;
pub use manager::FileManager;
