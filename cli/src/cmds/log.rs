use std::io::Write;

use super::{parse_object_name, App, Result};
use crate::find_repo;

use clap::{Arg, ArgMatches, SubCommand};
use gitcas_core::history;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("log")
        .about("Print the history of a commit as a Graphviz graph")
        .arg(
            Arg::with_name("commit")
                .required(true)
                .help("ID of the commit to start from"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let start = parse_object_name(args.value_of("commit").unwrap_or_default())?;
    let repo = find_repo::from_current_dir()?;

    // Collect first so that a broken history prints nothing rather than half a graph.
    let mut edges = Vec::new();
    history::walk(&repo, &start, |commit, parent| edges.push((*commit, *parent)))?;

    writeln!(app, "digraph log {{")?;
    for (commit, parent) in edges {
        writeln!(app, "  c_{} -> c_{};", commit, parent)?;
    }
    writeln!(app, "}}")?;

    Ok(())
}
