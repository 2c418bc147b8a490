//! # userfs-storage
//!
//! Local filesystem plumbing for the user file system: confining virtual
//! paths to a user's root, walking directory trees, measuring quota usage,
//! moving uploaded bytes into place, and guessing content types.

pub mod local;
pub mod mime;
pub mod naming;
pub mod path;
pub mod quota;
pub mod traverse;

pub use local::ByteStream;
pub use naming::DefaultUserFileNamingStrategy;
pub use path::PathRules;
pub use quota::QuotaEnforcer;
pub use traverse::{DefaultDirectoryTraverser, DirectoryTraverse};
