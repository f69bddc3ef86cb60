use std::{env, path::Path};

use gitcas_core::repo::Result;
use gitcas_on_disk::OnDiskRepo;

// Discover a git repo starting from the given path.
//
// The nearest directory at or above `path` that contains
// a `.git` directory is used.
//
// Returns a `Result` with `OnDiskRepo` or
// `gitcas_core::repo::Error` if no such repo exists.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDiskRepo> {
    OnDiskRepo::discover(path.as_ref())
}

// Discover a git repo starting from the current working directory.
#[cfg(not(tarpaulin_include))]
pub fn from_current_dir() -> Result<OnDiskRepo> {
    // This function is excluded from code coverage because we can't
    // be sure of the execution environment while testing. So we keep
    // it as simple as possible.
    let path = env::current_dir()?;
    from_path(path)
}
