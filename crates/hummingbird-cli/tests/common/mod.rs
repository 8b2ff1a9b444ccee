//! Shared test helpers for CLI integration tests.
#![allow(dead_code)]

use std::io::Cursor;

use clap::Parser;
use hummingbird_cli::config::CliArgs;
use hummingbird_cli::error::CliError;

/// Two events for one account: the first versioned and annotated, the
/// second still pending.
pub const ACCOUNT_EVENTS_JSON: &str = r#"[
  {
    "id": "evt-1",
    "aggregate_id": "acct-42",
    "version": 3,
    "command_id": "cmd-7",
    "timestamp": 1700000000000,
    "metadata": { "source": "test" },
    "payload": { "type": "opened", "owner": "alice" }
  },
  {
    "id": "evt-2",
    "aggregate_id": "acct-42",
    "command_id": "cmd-8",
    "timestamp": 1700000001500,
    "payload": { "type": "credited", "amount": 250 }
  }
]"#;

/// Parse `args` as the real binary would and run the command against
/// `stdin`, returning everything written to stdout.
pub fn run_cli(args: &[&str], stdin: &str) -> Result<String, CliError> {
    let argv = std::iter::once("hummingbird").chain(args.iter().copied());
    let parsed = CliArgs::try_parse_from(argv).unwrap();

    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    hummingbird_cli::run(&parsed.command, &mut input, &mut out)?;

    Ok(String::from_utf8(out).unwrap())
}
