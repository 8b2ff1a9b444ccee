//! Event serializer.
//!
//! Converts events to and from bytes. Decoding an [`Event`] checks its
//! invariants, so a document that names a blank id or a zero version is
//! rejected at the boundary rather than deep inside an aggregate.

use hummingbird_core::error::EventError;
use hummingbird_core::event::{AggregateId, DomainEvent, Event, EventPayload};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::envelope::{SCHEMA_VERSION, SerializedEvent, checksum};
use crate::format::Format;

/// Encodes and decodes events in a given [`Format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSerializer {
    format: Format,
    pretty: bool,
}

impl EventSerializer {
    /// Creates a serializer that writes compact documents in `format`.
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Enables or disables pretty-printed output. YAML output is always
    /// block style.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the format this serializer writes.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Encodes `event` into an envelope carrying its type and checksum.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Serialization` if encoding fails.
    pub fn serialize<Id, P>(&self, event: &Event<Id, P>) -> Result<SerializedEvent, EventError>
    where
        Id: AggregateId + Serialize,
        P: EventPayload + Serialize,
    {
        let data = self.encode(event)?;
        let serialized = SerializedEvent {
            event_id: event.id().to_owned(),
            event_type: event.event_type().to_owned(),
            format: self.format,
            schema_version: SCHEMA_VERSION,
            checksum: checksum(&data),
            data,
        };

        debug!(
            event_id = %serialized.event_id,
            event_type = %serialized.event_type,
            format = %serialized.format,
            bytes = serialized.data.len(),
            "serialized event"
        );
        Ok(serialized)
    }

    /// Decodes an envelope produced by [`EventSerializer::serialize`]. The
    /// envelope's own format is used, whatever this serializer writes.
    ///
    /// # Errors
    ///
    /// Returns `EventError::UnsupportedSchema` for unknown schema versions,
    /// `EventError::ChecksumMismatch` if the data was altered,
    /// `EventError::Serialization` if decoding fails or the decoded event is
    /// invalid, and `EventError::Validation` if the event does not match the
    /// envelope.
    pub fn deserialize<Id, P>(&self, serialized: &SerializedEvent) -> Result<Event<Id, P>, EventError>
    where
        Id: AggregateId + DeserializeOwned,
        P: EventPayload + DeserializeOwned,
    {
        if serialized.schema_version != SCHEMA_VERSION {
            warn!(
                event_id = %serialized.event_id,
                schema_version = serialized.schema_version,
                "rejected event with unsupported schema"
            );
            return Err(EventError::UnsupportedSchema {
                found: serialized.schema_version,
                supported: SCHEMA_VERSION,
            });
        }
        if !serialized.is_intact() {
            warn!(event_id = %serialized.event_id, "rejected event with checksum mismatch");
            return Err(EventError::ChecksumMismatch {
                event_id: serialized.event_id.clone(),
            });
        }

        let event: Event<Id, P> = decode_document(serialized.format, &serialized.data)?;
        if event.id() != serialized.event_id {
            return Err(EventError::Validation(format!(
                "envelope names event {} but data holds event {}",
                serialized.event_id,
                event.id()
            )));
        }

        debug!(
            event_id = %serialized.event_id,
            event_type = %serialized.event_type,
            "deserialized event"
        );
        Ok(event)
    }

    /// Encodes `event` as a bare document.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Serialization` if encoding fails.
    pub fn encode<Id, P>(&self, event: &Event<Id, P>) -> Result<Vec<u8>, EventError>
    where
        Id: AggregateId + Serialize,
        P: EventPayload + Serialize,
    {
        self.encode_document(event)
    }

    /// Decodes a bare event document.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Serialization` if decoding fails or the event is
    /// invalid.
    pub fn decode<Id, P>(&self, bytes: &[u8]) -> Result<Event<Id, P>, EventError>
    where
        Id: AggregateId + DeserializeOwned,
        P: EventPayload + DeserializeOwned,
    {
        decode_document(self.format, bytes)
    }

    /// Encodes `events` as one JSON array or YAML sequence.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Serialization` if encoding fails.
    pub fn encode_batch<Id, P>(&self, events: &[Event<Id, P>]) -> Result<Vec<u8>, EventError>
    where
        Id: AggregateId + Serialize,
        P: EventPayload + Serialize,
    {
        let bytes = self.encode_document(events)?;
        debug!(count = events.len(), format = %self.format, "encoded event batch");
        Ok(bytes)
    }

    /// Decodes a JSON array or YAML sequence of events.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Serialization` naming the first malformed or
    /// invalid event.
    pub fn decode_batch<Id, P>(&self, bytes: &[u8]) -> Result<Vec<Event<Id, P>>, EventError>
    where
        Id: AggregateId + DeserializeOwned,
        P: EventPayload + DeserializeOwned,
    {
        let events: Vec<Event<Id, P>> = decode_document(self.format, bytes)?;
        debug!(count = events.len(), format = %self.format, "decoded event batch");
        Ok(events)
    }

    fn encode_document<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EventError> {
        let encoded = match self.format {
            Format::Json if self.pretty => serde_json::to_vec_pretty(value).map_err(|e| e.to_string()),
            Format::Json => serde_json::to_vec(value).map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| e.to_string()),
        };
        encoded.map_err(EventError::Serialization)
    }
}

fn decode_document<T: DeserializeOwned>(format: Format, bytes: &[u8]) -> Result<T, EventError> {
    let decoded = match format {
        Format::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
    };
    decoded.map_err(|msg| EventError::Serialization(format!("invalid {format} event data: {msg}")))
}
