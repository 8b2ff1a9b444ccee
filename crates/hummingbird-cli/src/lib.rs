//! Hummingbird CLI — inspect and transform event documents.
//!
//! The binary is a thin shell over [`run`], which takes its input and
//! output streams as arguments so commands can be driven from tests.

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

use crate::commands::{annotate, convert, inspect};
use crate::config::{CliCommand, resolve_format};
use crate::error::CliError;

/// Runs `command`, reading its input file or, when none was given, `stdin`.
///
/// # Errors
///
/// Returns `CliError` if the input cannot be read, the events are invalid,
/// or the output cannot be written.
pub fn run(command: &CliCommand, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<(), CliError> {
    let input = read_input(command.input(), stdin)?;

    match command {
        CliCommand::Inspect(args) => {
            let format = resolve_format(args.format, args.input.as_deref());
            inspect::run(format, &input, out)
        }
        CliCommand::Convert(args) => {
            let from = resolve_format(args.from, args.input.as_deref());
            convert::run(from, args.to, args.pretty, &input, out)
        }
        CliCommand::Annotate(args) => {
            let format = resolve_format(args.format, args.input.as_deref());
            annotate::run(format, &args.entries, &input, out)
        }
    }
}

fn read_input(path: Option<&Path>, stdin: &mut dyn Read) -> Result<Vec<u8>, CliError> {
    if let Some(path) = path {
        debug!(path = %path.display(), "reading events from file");
        return Ok(std::fs::read(path)?);
    }

    debug!("reading events from stdin");
    let mut input = Vec::new();
    stdin.read_to_end(&mut input)?;
    Ok(input)
}
