//! This crate provides a git object store that keeps content on the local file system.
//!
//! It intentionally uses the same `.git` folder format as command-line git:
//! loose objects are zlib-compressed and sharded by the first two hex digits
//! of their ID, so results may be compared for similar operations.

mod config;
pub use config::Config;

mod on_disk_repo;
pub use on_disk_repo::OnDiskRepo;
