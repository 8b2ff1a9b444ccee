//! `hummingbird inspect`.

use std::borrow::Cow;
use std::io::Write;

use chrono::SecondsFormat;
use hummingbird_core::event::DomainEvent;
use hummingbird_serialization::{EventSerializer, Format};
use tracing::{info, instrument};

use super::DocumentEvent;
use crate::error::CliError;

/// Number of checksum characters shown per event.
const CHECKSUM_PREFIX_LEN: usize = 12;

/// Decodes `input` and writes a tab-separated summary, one line per event,
/// after a header line. Control characters in ids are escaped so every
/// event stays on one row.
///
/// # Errors
///
/// Returns `CliError::Event` if the document does not decode into valid
/// events and `CliError::Io` if writing fails.
#[instrument(skip(input, out), fields(bytes = input.len()))]
pub fn run(format: Format, input: &[u8], out: &mut dyn Write) -> Result<(), CliError> {
    let serializer = EventSerializer::new(format);
    let events: Vec<DocumentEvent> = serializer.decode_batch(input)?;

    writeln!(out, "ID\tAGGREGATE\tVERSION\tCOMMAND\tOCCURRED_AT\tMETADATA\tCHECKSUM")?;
    for event in &events {
        let serialized = serializer.serialize(event)?;
        let version = event
            .version()
            .map_or_else(|| "-".to_owned(), |v| v.to_string());
        let occurred_at = event.occurred_at().map_or_else(
            || event.timestamp().to_string(),
            |t| t.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            tsv_field(event.id()),
            tsv_field(event.aggregate_id()),
            version,
            tsv_field(event.command_id()),
            occurred_at,
            event.metadata().len(),
            &serialized.checksum[..CHECKSUM_PREFIX_LEN],
        )?;
    }
    out.flush()?;

    info!(count = events.len(), "inspected events");
    Ok(())
}

fn tsv_field(raw: &str) -> Cow<'_, str> {
    if raw.chars().any(char::is_control) {
        Cow::Owned(raw.escape_debug().to_string())
    } else {
        Cow::Borrowed(raw)
    }
}
