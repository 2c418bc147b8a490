//! File system domain entities.

pub mod command;
pub mod entry;

pub use command::{FilePathCommand, FileUploadCommand};
pub use entry::{DirectoryEntry, FileEntry};
