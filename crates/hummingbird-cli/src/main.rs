//! Hummingbird CLI entry point.

use std::error::Error;
use std::io;

use clap::Parser;

use hummingbird_cli::config::CliArgs;
use hummingbird_cli::logging::init_logging;

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();
    init_logging(&args.log_level, args.log_format);

    tracing::debug!(command = ?args.command, "starting hummingbird");

    if let Err(err) = hummingbird_cli::run(&args.command, &mut io::stdin().lock(), &mut io::stdout().lock()) {
        tracing::error!(error = %err, "command failed");
        return Err(err.into());
    }

    Ok(())
}
