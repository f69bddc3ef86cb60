use std::io::Write;

use super::{parse_object_name, usage_error, App, Result};
use crate::find_repo;

use clap::{Arg, ArgMatches, ErrorKind, SubCommand};
use gitcas_core::object::{Id, Object, Tree};
use gitcas_core::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the contents of a tree object")
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("ID of a tree, or of a commit whose tree should be listed"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id = parse_object_name(args.value_of("tree").unwrap_or_default())?;
    let repo = find_repo::from_current_dir()?;

    let tree = load_tree(&repo, &id)?;
    write_entries(app, &tree)
}

// A commit stands for its tree.
fn load_tree<R: Repo>(repo: &R, id: &Id) -> Result<Tree> {
    match repo.get_object(id)? {
        Object::Tree(tree) => Ok(tree),
        Object::Commit(commit) => match repo.get_object(commit.tree())? {
            Object::Tree(tree) => Ok(tree),
            _ => Err(not_a_tree(commit.tree())),
        },
        Object::Blob(_) => Err(not_a_tree(id)),
    }
}

fn not_a_tree(id: &Id) -> Box<dyn std::error::Error> {
    usage_error(ErrorKind::InvalidValue, format!("{} is not a tree object", id))
}

/// Writes one `<mode> <type> <id>\t<path>` line per entry, with the mode
/// zero-padded to six digits as `git ls-tree` does.
pub(crate) fn write_entries(app: &mut App, tree: &Tree) -> Result<()> {
    for entry in tree.entries() {
        let mode = String::from_utf8_lossy(entry.mode());
        let kind = match entry.file_mode() {
            Some(file_mode) => file_mode.kind(),
            None => {
                return Err(usage_error(
                    ErrorKind::InvalidValue,
                    format!("unknown file mode {} in tree entry", mode),
                ))
            }
        };

        write!(app, "{:0>6} {} {}\t", mode, kind, entry.id())?;
        app.write_all(entry.path())?;
        writeln!(app)?;
    }

    Ok(())
}
