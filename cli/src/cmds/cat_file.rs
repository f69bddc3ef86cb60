use std::io::Write;

use super::{ls_tree, parse_object_name, usage_error, App, Result};
use crate::find_repo;

use clap::{Arg, ArgGroup, ArgMatches, ErrorKind, SubCommand};
use gitcas_core::object::{Kind, Object};
use gitcas_core::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content or type and size information for repository objects")
        .arg(
            Arg::with_name("t")
                .short("t")
                .help("Show the object type identified by <object>"),
        )
        .arg(
            Arg::with_name("s")
                .short("s")
                .help("Show the object size identified by <object>"),
        )
        .arg(
            Arg::with_name("p")
                .short("p")
                .help("Pretty-print the contents of <object> based on its type"),
        )
        .group(ArgGroup::with_name("mode").args(&["t", "s", "p"]))
        .arg(
            Arg::with_name("type_or_object")
                .required(true)
                .value_name("type|object")
                .help("Expected object type, or the object when -t, -s, or -p is given"),
        )
        .arg(
            Arg::with_name("object")
                .help("The object to show, when a type is given"),
        )
}

enum Mode {
    Type,
    Size,
    Pretty,
    Raw(Kind),
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let first = args.value_of("type_or_object").unwrap_or_default();

    let (mode, name) = match args.value_of("object") {
        Some(name) => {
            if args.is_present("t") || args.is_present("s") || args.is_present("p") {
                return Err(usage_error(
                    ErrorKind::ArgumentConflict,
                    "<type> can not be combined with -t, -s or -p".to_string(),
                ));
            }
            let kind = first.parse::<Kind>().map_err(|err| {
                usage_error(ErrorKind::InvalidValue, err.to_string())
            })?;
            (Mode::Raw(kind), name)
        }
        None => {
            let mode = if args.is_present("t") {
                Mode::Type
            } else if args.is_present("s") {
                Mode::Size
            } else if args.is_present("p") {
                Mode::Pretty
            } else {
                return Err(usage_error(
                    ErrorKind::MissingRequiredArgument,
                    "one of -t, -s, -p or <type> is required".to_string(),
                ));
            };
            (mode, first)
        }
    };

    let id = parse_object_name(name)?;
    let repo = find_repo::from_current_dir()?;

    match mode {
        // Type and size come from the stored frame without decoding the payload.
        Mode::Type => writeln!(app, "{}", repo.get_raw_object(&id)?.0)?,
        Mode::Size => writeln!(app, "{}", repo.get_raw_object(&id)?.1.len())?,
        Mode::Pretty => match repo.get_object(&id)? {
            Object::Tree(tree) => ls_tree::write_entries(app, &tree)?,
            object => app.write_all(&object.encode())?,
        },
        Mode::Raw(kind) => {
            let object = repo.get_object(&id)?;
            if object.kind() != kind {
                return Err(usage_error(
                    ErrorKind::InvalidValue,
                    format!("{} is a {}, not a {}", id, object.kind(), kind),
                ));
            }
            app.write_all(&object.encode())?;
        }
    }

    Ok(())
}
