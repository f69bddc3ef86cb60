use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use gitcas_core::repo::{Error, Result};

/// The repository settings read from `.git/config`.
///
/// Only the `[core]` keys below are interpreted. Everything else in the file is
/// accepted and ignored. A `Config` is read once when a repository is opened
/// and is not modified afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    repository_format_version: u32,
    file_mode: bool,
    bare: bool,
    log_all_ref_updates: bool,
}

impl Default for Config {
    /// The settings command-line git writes for a new, non-bare repository.
    fn default() -> Config {
        Config {
            repository_format_version: 0,
            file_mode: true,
            bare: false,
            log_all_ref_updates: true,
        }
    }
}

impl Config {
    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Config> {
        match fs::read_to_string(path) {
            Ok(text) => Config::parse(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::MissingConfig(path.to_path_buf()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Parse git-config text.
    ///
    /// Section and key names are case-insensitive. Lines starting with `#` or `;`
    /// are comments. A key with no `=` is a boolean `true`, as in git.
    /// `core.repositoryformatversion` is required.
    pub fn parse(text: &str) -> Result<Config> {
        let mut config = Config::default();
        let mut version = None;
        let mut section = String::new();

        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(invalid(n, "unterminated section header"));
                }
                section = line[1..line.len() - 1].trim().to_lowercase();
                continue;
            }

            if section != "core" {
                continue;
            }

            let (key, value) = match line.find('=') {
                Some(eq) => (line[..eq].trim(), line[eq + 1..].trim()),
                None => (line, "true"),
            };

            match key.to_lowercase().as_str() {
                "repositoryformatversion" => {
                    let v = value
                        .parse::<u32>()
                        .map_err(|_| invalid(n, "repositoryformatversion is not a number"))?;
                    version = Some(v);
                }
                "filemode" => config.file_mode = parse_bool(value).ok_or_else(|| invalid(n, key))?,
                "bare" => config.bare = parse_bool(value).ok_or_else(|| invalid(n, key))?,
                "logallrefupdates" => {
                    config.log_all_ref_updates =
                        parse_bool(value).ok_or_else(|| invalid(n, key))?
                }
                _ => (),
            }
        }

        config.repository_format_version = version.ok_or_else(|| {
            Error::InvalidConfig("core.repositoryformatversion is missing".to_string())
        })?;

        Ok(config)
    }

    pub fn repository_format_version(&self) -> u32 {
        self.repository_format_version
    }

    pub fn file_mode(&self) -> bool {
        self.file_mode
    }

    pub fn bare(&self) -> bool {
        self.bare
    }

    pub fn log_all_ref_updates(&self) -> bool {
        self.log_all_ref_updates
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "[core]\n\trepositoryformatversion = {}\n\tfilemode = {}\n\tbare = {}\n\tlogallrefupdates = {}\n",
            self.repository_format_version, self.file_mode, self.bare, self.log_all_ref_updates
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}

fn invalid(line_index: usize, what: &str) -> Error {
    Error::InvalidConfig(format!("line {}: {}", line_index + 1, what))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIT_INIT_CONFIG: &str = "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n\tlogallrefupdates = true\n";

    #[test]
    fn default_matches_git_init() {
        assert_eq!(Config::default().to_string(), GIT_INIT_CONFIG);
    }

    #[test]
    fn parse_git_init() {
        let config = Config::parse(GIT_INIT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.repository_format_version(), 0);
        assert!(config.file_mode());
        assert!(!config.bare());
        assert!(config.log_all_ref_updates());
    }

    #[test]
    fn parse_ignores_other_sections_and_comments() {
        let text = "# leading comment\n\
                    [Core]\n\
                    \tRepositoryFormatVersion = 1\n\
                    \tbare\n\
                    \tfilemode = off\n\
                    \tignorecase = true\n\
                    ; another comment\n\
                    [remote \"origin\"]\n\
                    \turl = https://example.com/repo.git\n\
                    \trepositoryformatversion = 7\n";

        let config = Config::parse(text).unwrap();
        assert_eq!(config.repository_format_version(), 1);
        assert!(config.bare());
        assert!(!config.file_mode());
    }

    #[test]
    fn error_missing_version() {
        let err = Config::parse("[core]\n\tbare = false\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: core.repositoryformatversion is missing"
        );
    }

    #[test]
    fn error_bad_values() {
        let err = Config::parse("[core]\n\trepositoryformatversion = zero\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: line 2: repositoryformatversion is not a number"
        );

        let err = Config::parse("[core]\nrepositoryformatversion = 0\nbare = maybe\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: line 3: bare");

        let err = Config::parse("[core\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: line 1: unterminated section header"
        );
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");

        match Config::load(&path).unwrap_err() {
            Error::MissingConfig(err_path) => assert_eq!(err_path, path),
            err => panic!("Unexpected error {:?}", err),
        }
    }
}
