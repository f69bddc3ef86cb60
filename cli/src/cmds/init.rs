use std::{io::Write, path::Path};

use super::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitcas_on_disk::OnDiskRepo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty git repository")
        .arg(
            Arg::with_name("directory")
                .required(true)
                .help("The directory to create (must be empty if it exists)"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    // `directory` is required, so clap has already rejected a missing value.
    let dir = init_matches.value_of("directory").unwrap_or_default();

    let path = Path::new(dir);
    OnDiskRepo::init(path)?;

    writeln!(
        app,
        "Initialized empty Git repository in {}",
        path.display()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::App;

    use gitcas_on_disk::OnDiskRepo;

    #[test]
    fn creates_repo() {
        let r_path = tempfile::tempdir().unwrap();
        let r_pathstr = r_path.path().to_str().unwrap();

        let stdout = App::run_with_args(vec!["init", &r_pathstr]).unwrap();

        let expected_std = format!("Initialized empty Git repository in {}\n", r_pathstr);
        assert_eq!(stdout, expected_std.as_bytes());

        let repo = OnDiskRepo::new(r_path.path()).unwrap();
        assert_eq!(repo.config().repository_format_version(), 0);
        assert!(r_path.path().join(".git/refs/heads").is_dir());
    }

    #[test]
    fn creates_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let new_dir = temp.path().join("brand-new");
        let new_dirstr = new_dir.to_str().unwrap();

        App::run_with_args(vec!["init", new_dirstr]).unwrap();
        assert!(new_dir.join(".git/HEAD").is_file());
    }

    #[test]
    fn error_dir_not_empty() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("existing"), "x").unwrap();

        let err = App::run_with_args(vec!["init", temp.path().to_str().unwrap()]).unwrap_err();
        assert!(
            err.to_string().contains("is not an empty directory"),
            "\nincorrect error message:\n\n{}",
            err
        );
    }

    #[test]
    fn error_no_dir() {
        let err = App::run_with_args(vec!["init"]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("required arguments were not provided"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }

    #[test]
    fn error_too_many_args() {
        let err = App::run_with_args(vec!["init", "here", "and there"]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("wasn't expected"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
