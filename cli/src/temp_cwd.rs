use std::{
    env,
    path::{Path, PathBuf},
};

// Switches the process's working directory for the lifetime of the value,
// then switches back on drop.
//
// The working directory is process-wide state, so every test that
// creates one of these must be marked #[serial]. Test-only, hence the
// panics instead of `Result`.
pub(crate) struct TempCwd {
    restore_to: PathBuf,
}

impl TempCwd {
    pub fn new<P: AsRef<Path>>(path: P) -> TempCwd {
        let restore_to = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { restore_to }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.restore_to).unwrap();
    }
}
