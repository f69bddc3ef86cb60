use std::path::PathBuf;

use thiserror::Error;

use crate::object::Id;

/// Describes the potential error conditions that might arise from gitcas `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object {0} not found")]
    NotFound(Id),

    #[error("object {id} is corrupt: {reason}")]
    CorruptObject { id: Id, reason: String },

    #[error("object has unknown type `{0}`")]
    UnknownType(String),

    /// `init` target exists but is a file or other non-directory.
    #[error("{0} exists and is not a directory")]
    AlreadyExists(PathBuf),

    /// `init` target exists and already has entries, including an existing `.git`.
    #[error("{0} is not an empty directory")]
    DirectoryNotEmpty(PathBuf),

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedVersion(u32),

    #[error("working directory {0} doesn't exist")]
    WorkDirDoesntExist(PathBuf),

    #[error("git directory {0} doesn't exist")]
    GitDirDoesntExist(PathBuf),

    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("missing configuration file {0}")]
    MissingConfig(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for gitcas `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
