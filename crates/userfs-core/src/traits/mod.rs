//! Core traits defined in `userfs-core` and implemented by other crates.

pub mod naming;

pub use naming::{ResolvedPath, UserFileNamingStrategy};
