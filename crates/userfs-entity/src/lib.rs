//! # userfs-entity
//!
//! Domain value objects for the user file system. Everything in this crate
//! is plain data: directory trees returned to clients, commands accepted by
//! the file manager, and quota reports. All types derive `Debug`, `Clone`,
//! and the serde traits where they cross the HTTP boundary.

pub mod file;
pub mod storage;
