//! This crate implements the core data model for a content-addressed git object store:
//! the object codecs, the content hasher, the abstract `Repo` store, and history traversal.

pub mod hash;
pub mod history;
pub mod object;
pub mod repo;
