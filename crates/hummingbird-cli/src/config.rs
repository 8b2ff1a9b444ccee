//! Command-line and environment configuration.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use hummingbird_serialization::Format;

use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "hummingbird",
    about = "Inspect and transform Hummingbird event documents",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        global = true,
        env = "HUMMINGBIRD_LOG_LEVEL",
        default_value = "warn",
        value_name = "LEVEL",
        help = "Log filter used when RUST_LOG is not set"
    )]
    pub log_level: String,

    #[arg(
        long,
        global = true,
        env = "HUMMINGBIRD_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty,
        value_name = "FORMAT",
        help = "Log output format (json or pretty)"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Print one summary line per event.
    Inspect(InspectArgs),
    /// Re-encode a batch of events in another format.
    Convert(ConvertArgs),
    /// Merge metadata entries into every event.
    Annotate(AnnotateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(value_name = "INPUT", help = "Event document to read; stdin when omitted")]
    pub input: Option<PathBuf>,

    #[arg(long, value_name = "FORMAT", help = "Input format (json or yaml)")]
    pub format: Option<Format>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(value_name = "INPUT", help = "Event document to read; stdin when omitted")]
    pub input: Option<PathBuf>,

    #[arg(long, value_name = "FORMAT", help = "Input format (json or yaml)")]
    pub from: Option<Format>,

    #[arg(long, value_name = "FORMAT", help = "Output format (json or yaml)")]
    pub to: Format,

    #[arg(long, help = "Pretty-print JSON output")]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnnotateArgs {
    #[arg(value_name = "INPUT", help = "Event document to read; stdin when omitted")]
    pub input: Option<PathBuf>,

    #[arg(long, value_name = "FORMAT", help = "Input and output format (json or yaml)")]
    pub format: Option<Format>,

    #[arg(
        long = "meta",
        value_name = "KEY=VALUE",
        value_parser = parse_meta_entry,
        required = true,
        help = "Metadata entry to merge; repeatable"
    )]
    pub entries: Vec<(String, String)>,
}

impl CliCommand {
    /// Returns the input path, if one was given.
    #[must_use]
    pub fn input(&self) -> Option<&Path> {
        match self {
            CliCommand::Inspect(args) => args.input.as_deref(),
            CliCommand::Convert(args) => args.input.as_deref(),
            CliCommand::Annotate(args) => args.input.as_deref(),
        }
    }
}

/// Picks the input format: the explicit flag, else the input file
/// extension, else JSON.
#[must_use]
pub fn resolve_format(explicit: Option<Format>, input: Option<&Path>) -> Format {
    explicit
        .or_else(|| input.and_then(Format::from_path))
        .unwrap_or_default()
}

fn parse_meta_entry(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("metadata key must not be empty in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
