//! Storage domain entities.

pub mod quota;

pub use quota::StorageQuota;
