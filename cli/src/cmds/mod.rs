use clap::{Error, ErrorKind};
use gitcas_core::object::Id;

use crate::{App, Result};

mod cat_file;
mod hash_object;
mod init;
mod log;
mod ls_tree;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(cat_file::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(log::subcommand())
        .subcommand(ls_tree::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("cat-file", Some(m)) => cat_file::run(app, &m),
        ("hash-object", Some(m)) => hash_object::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("log", Some(m)) => log::run(app, &m),
        ("ls-tree", Some(m)) => ls_tree::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}

pub(crate) fn usage_error(kind: ErrorKind, message: String) -> Box<dyn std::error::Error> {
    Box::new(Error {
        message,
        kind,
        info: None,
    })
}

// Objects are named by their full 40-digit hex ID.
pub(crate) fn parse_object_name(name: &str) -> Result<Id> {
    name.parse::<Id>().map_err(|err| {
        usage_error(
            ErrorKind::InvalidValue,
            format!("not a valid object name {}: {}", name, err),
        )
    })
}
