use std::{
    fs,
    io::{Read, Write},
};

use super::{usage_error, App, Result};
use crate::find_repo;

use clap::{Arg, ArgMatches, ErrorKind, SubCommand};
use gitcas_core::object::{Kind, Object};
use gitcas_core::repo::Repo;
use tracing::debug;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally creates an object from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let kind = kind_from_args(args)?;
    let content = content_from_args(app, args)?;

    // Trees and commits must parse. What gets hashed is the decoded object
    // re-encoded, which is byte-identical for anything already in canonical form.
    let object = Object::decode(kind, &content).map_err(|err| {
        debug!(%kind, error = %err, "content doesn't decode");
        usage_error(ErrorKind::InvalidValue, format!("corrupt {}", kind))
    })?;

    let id = if args.is_present("w") {
        let mut repo = find_repo::from_current_dir()?;
        repo.put_object(&object)?
    } else {
        object.id()
    };

    writeln!(app, "{}", id)?;

    Ok(())
}

fn kind_from_args(args: &ArgMatches) -> Result<Kind> {
    match args.value_of("t") {
        Some(type_str) => type_str.parse::<Kind>().map_err(|_| {
            usage_error(
                ErrorKind::InvalidValue,
                "-t must be one of blob, commit, or tree".to_string(),
            )
        }),
        None => Ok(Kind::Blob),
    }
}

fn content_from_args(app: &mut App, args: &ArgMatches) -> Result<Vec<u8>> {
    let stdin = args.is_present("stdin");

    match (args.value_of("file"), stdin) {
        (Some(file), false) => Ok(fs::read(file)?),
        (None, true) => {
            let mut content = Vec::new();
            app.stdin.read_to_end(&mut content)?;
            Ok(content)
        }
        _ => Err(usage_error(
            ErrorKind::MissingRequiredArgument,
            "content source must be either --stdin or a file path".to_string(),
        )),
    }
}
