//! Core type definitions used across the workspace.

pub mod size;
pub mod user;

pub use size::ByteSize;
pub use user::UserKey;
