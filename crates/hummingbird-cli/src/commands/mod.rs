//! Command implementations.
//!
//! Every command decodes a batch of events with `String` aggregate ids and
//! free-form JSON payloads, which covers any document this framework writes.

pub mod annotate;
pub mod convert;
pub mod inspect;

use hummingbird_core::event::Event;

/// Event shape the CLI reads and writes.
pub type DocumentEvent = Event<String, serde_json::Value>;

/// Writes `bytes` and terminates the output with a newline if the encoder
/// did not.
fn write_document(out: &mut dyn std::io::Write, bytes: &[u8]) -> std::io::Result<()> {
    out.write_all(bytes)?;
    if !bytes.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    out.flush()
}
