//! `hummingbird convert`.

use std::io::Write;

use hummingbird_serialization::{EventSerializer, Format};
use tracing::{info, instrument};

use super::{DocumentEvent, write_document};
use crate::error::CliError;

/// Decodes `input` as `from` and writes it back encoded as `to`.
///
/// # Errors
///
/// Returns `CliError::Event` if decoding or encoding fails and
/// `CliError::Io` if writing fails.
#[instrument(skip(input, out), fields(bytes = input.len()))]
pub fn run(
    from: Format,
    to: Format,
    pretty: bool,
    input: &[u8],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let events: Vec<DocumentEvent> = EventSerializer::new(from).decode_batch(input)?;
    let bytes = EventSerializer::new(to).pretty(pretty).encode_batch(&events)?;
    write_document(out, &bytes)?;

    info!(count = events.len(), "converted events");
    Ok(())
}
