use std::fs;
use std::path::Path;

use gitcas_core::repo::{Error, Result};

use crate::Config;

// A new repository may only be created where nothing exists yet
// or in a directory with no entries.
pub(super) fn ensure_empty_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        return Ok(());
    }

    if !path.is_dir() {
        return Err(Error::AlreadyExists(path.to_path_buf()));
    }

    if fs::read_dir(path)?.next().is_some() {
        return Err(Error::DirectoryNotEmpty(path.to_path_buf()));
    }

    Ok(())
}

// Lays out the same `.git` skeleton that `git init` does,
// minus the sample hooks.
pub(super) fn create_git_dir(git_dir: &Path, config: &Config) -> Result<()> {
    fs::create_dir_all(git_dir)?;

    fs::write(git_dir.join("config"), config.to_string())?;
    create_description(git_dir)?;
    create_head(git_dir)?;

    fs::create_dir_all(git_dir.join("hooks"))?;

    create_info_dir(git_dir)?;
    create_objects_dir(git_dir)?;
    create_refs_dir(git_dir)
}

fn create_description(git_dir: &Path) -> Result<()> {
    let desc_txt = "Unnamed repository; edit this file 'description' to name the repository.\n";
    fs::write(git_dir.join("description"), desc_txt).map_err(|e| e.into())
}

fn create_head(git_dir: &Path) -> Result<()> {
    fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n").map_err(|e| e.into())
}

fn create_info_dir(git_dir: &Path) -> Result<()> {
    let info_dir = git_dir.join("info");
    fs::create_dir_all(&info_dir)?;

    let exclude_txt = "# git ls-files --others --exclude-from=.git/info/exclude\n# Lines that start with '#' are comments.\n# For a project mostly in C, the following would be a good set of\n# exclude patterns (uncomment them if you want to use them):\n# *.[oa]\n# *~\n.DS_Store\n";
    fs::write(info_dir.join("exclude"), exclude_txt).map_err(|e| e.into())
}

fn create_objects_dir(git_dir: &Path) -> Result<()> {
    let objects_dir = git_dir.join("objects");
    fs::create_dir_all(objects_dir.join("info"))?;
    fs::create_dir_all(objects_dir.join("pack")).map_err(|e| e.into())
}

fn create_refs_dir(git_dir: &Path) -> Result<()> {
    let refs_dir = git_dir.join("refs");
    fs::create_dir_all(refs_dir.join("heads"))?;
    fs::create_dir_all(refs_dir.join("tags")).map_err(|e| e.into())
}
