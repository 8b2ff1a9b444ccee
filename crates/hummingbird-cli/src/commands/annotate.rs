//! `hummingbird annotate`.

use std::io::Write;

use hummingbird_core::event::DomainEvent;
use hummingbird_serialization::{EventSerializer, Format};
use tracing::{info, instrument};

use super::{DocumentEvent, write_document};
use crate::error::CliError;

/// Merges `entries` into the metadata of every event in `input` and writes
/// the batch back in the same format. Entries replace existing values with
/// the same key.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if `entries` is empty or has a blank
/// key, `CliError::Event` if decoding or encoding fails, and `CliError::Io`
/// if writing fails.
#[instrument(skip(entries, input, out), fields(entries = entries.len(), bytes = input.len()))]
pub fn run(
    format: Format,
    entries: &[(String, String)],
    input: &[u8],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if entries.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one metadata entry is required".into(),
        ));
    }
    if entries.iter().any(|(key, _)| key.trim().is_empty()) {
        return Err(CliError::InvalidArgument(
            "metadata keys must not be empty".into(),
        ));
    }

    let serializer = EventSerializer::new(format);
    let events: Vec<DocumentEvent> = serializer
        .decode_batch::<String, serde_json::Value>(input)?
        .into_iter()
        .map(|event| event.with_metadata(entries.iter().cloned()))
        .collect();
    let bytes = serializer.encode_batch(&events)?;
    write_document(out, &bytes)?;

    info!(count = events.len(), "annotated events");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &[u8] = br#"[{"id":"evt-1","aggregate_id":"acct-42","command_id":"cmd-7","timestamp":0,"metadata":{"source":"api"},"payload":null}]"#;

    #[test]
    fn test_run_merges_and_overrides_metadata() {
        // Arrange
        let entries = vec![
            ("source".to_owned(), "replay".to_owned()),
            ("batch".to_owned(), "7".to_owned()),
        ];
        let mut out = Vec::new();

        // Act
        run(Format::Json, &entries, INPUT, &mut out).unwrap();

        // Assert
        let events: Vec<DocumentEvent> = EventSerializer::new(Format::Json)
            .decode_batch(&out)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metadata_value("source"), Some("replay"));
        assert_eq!(events[0].metadata_value("batch"), Some("7"));
    }

    #[test]
    fn test_run_requires_entries() {
        let mut out = Vec::new();

        let result = run(Format::Json, &[], INPUT, &mut out);

        match result {
            Err(CliError::InvalidArgument(msg)) => {
                assert_eq!(msg, "at least one metadata entry is required");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
