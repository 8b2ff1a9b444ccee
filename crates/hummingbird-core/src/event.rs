//! Domain event abstractions.
//!
//! [`DomainEvent`] is the contract every event satisfies so that generic
//! infrastructure can handle events polymorphically. [`Event`] is the
//! standard implementation: identity and correlation fields fixed at
//! construction, a version assigned exactly once by whoever appends the
//! event, and a string metadata map that is merged by value.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::EventError;

/// Auxiliary string data attached to an event (audit information, origin,
/// tags). Keys are unique; order carries no meaning.
pub type MetaData = BTreeMap<String, String>;

/// Event type reported by payloads that do not name a kind of their own.
pub const DEFAULT_EVENT_TYPE: &str = "hummingbird.event";

/// Identifier of the aggregate an event applies to.
///
/// Implemented for every type with the listed bounds, so `String`, `Uuid`,
/// integers and domain-specific newtypes all qualify.
pub trait AggregateId: Clone + fmt::Debug + fmt::Display + Eq + Send + Sync + 'static {}

impl<T> AggregateId for T where T: Clone + fmt::Debug + fmt::Display + Eq + Send + Sync + 'static {}

/// Trait implemented by event payloads.
///
/// Closed sets of event kinds are usually an enum whose `event_type`
/// matches on the variant.
pub trait EventPayload: fmt::Debug + Send + Sync {
    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str {
        DEFAULT_EVENT_TYPE
    }
}

impl EventPayload for () {}

impl EventPayload for serde_json::Value {}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + fmt::Debug {
    /// The identifier type of the target aggregate.
    type AggregateId: AggregateId;

    /// Returns the unique event identifier.
    fn id(&self) -> &str;

    /// Returns the identifier of the aggregate this event applies to.
    fn aggregate_id(&self) -> &Self::AggregateId;

    /// Returns the aggregate version reached once this event is applied, or
    /// `None` while the event has not been versioned yet.
    fn version(&self) -> Option<i64>;

    /// Assigns the aggregate version reached once this event is applied.
    ///
    /// # Errors
    ///
    /// Returns `EventError::VersionAlreadyAssigned` if the event already
    /// carries a version, and `EventError::Validation` if `version < 1`.
    fn set_version(&mut self, version: i64) -> Result<(), EventError>;

    /// Returns the id of the command (transaction) that produced the event.
    fn command_id(&self) -> &str;

    /// Returns the creation time in milliseconds since the Unix epoch.
    fn timestamp(&self) -> i64;

    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str;

    /// Returns all metadata entries. Empty, never absent, when nothing was
    /// attached.
    fn metadata(&self) -> &MetaData;

    /// Returns the metadata value stored under `key`.
    fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata().get(key).map(String::as_str)
    }

    /// Merges `entries` into the metadata and returns the merged event.
    /// Entries win over existing values with the same key.
    #[must_use]
    fn with_metadata<I, K, V>(self, entries: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>;

    /// Single-entry form of [`DomainEvent::with_metadata`].
    #[must_use]
    fn with_metadata_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        let entry: (String, String) = (key.into(), value.into());
        self.with_metadata([entry])
    }
}

/// Standard domain event record.
///
/// `Event<Id>` carries no payload; concrete events put their data in `P`.
///
/// Decoding runs the same checks as [`Event::new`], so a deserialized event
/// never has a blank id or a version below 1. A missing or `null` payload
/// decodes as unit, which `()` and `serde_json::Value` accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event<Id, P = ()> {
    id: String,
    aggregate_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<i64>,
    command_id: String,
    timestamp: i64,
    #[serde(default)]
    metadata: MetaData,
    payload: P,
}

/// Wire form of [`Event`] before its invariants are checked.
#[derive(Deserialize)]
struct EventRecord<Id, P> {
    id: String,
    aggregate_id: Id,
    #[serde(default)]
    version: Option<i64>,
    command_id: String,
    timestamp: i64,
    #[serde(default)]
    metadata: MetaData,
    payload: Option<P>,
}

impl<'de, Id, P> Deserialize<'de> for Event<Id, P>
where
    Id: AggregateId + Deserialize<'de>,
    P: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = EventRecord::<Id, P>::deserialize(deserializer)?;
        let payload = match record.payload {
            Some(payload) => payload,
            None => P::deserialize(<() as IntoDeserializer<'de, D::Error>>::into_deserializer(()))?,
        };

        let event = Self {
            id: record.id,
            aggregate_id: record.aggregate_id,
            version: record.version,
            command_id: record.command_id,
            timestamp: record.timestamp,
            metadata: record.metadata,
            payload,
        };
        event.validate().map_err(de::Error::custom)?;
        Ok(event)
    }
}

impl<Id: AggregateId, P> Event<Id, P> {
    /// Creates an unversioned event with empty metadata.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Validation` if `id` or `command_id` is blank.
    pub fn new(
        id: impl Into<String>,
        aggregate_id: Id,
        command_id: impl Into<String>,
        timestamp: i64,
        payload: P,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            aggregate_id,
            version: None,
            command_id: command_id.into(),
            timestamp,
            metadata: MetaData::new(),
            payload,
        };
        event.validate()?;
        Ok(event)
    }

    /// Checks the structural invariants: non-blank ids and, when present, a
    /// version of at least 1.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Validation` describing the first violation.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::Validation("event id must not be empty".into()));
        }
        if self.command_id.trim().is_empty() {
            return Err(EventError::Validation(format!(
                "command id of event {} must not be empty",
                self.id
            )));
        }
        match self.version {
            Some(version) if version < 1 => Err(EventError::Validation(format!(
                "version of event {} must be at least 1, got {version}",
                self.id
            ))),
            _ => Ok(()),
        }
    }

    /// Returns the event payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the event and returns its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Returns the creation time as a UTC date-time, or `None` if the
    /// timestamp is outside the representable range.
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl<Id: AggregateId, P: EventPayload> DomainEvent for Event<Id, P> {
    type AggregateId = Id;

    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_id(&self) -> &Id {
        &self.aggregate_id
    }

    fn version(&self) -> Option<i64> {
        self.version
    }

    fn set_version(&mut self, version: i64) -> Result<(), EventError> {
        if let Some(current) = self.version {
            return Err(EventError::VersionAlreadyAssigned {
                event_id: self.id.clone(),
                current,
                attempted: version,
            });
        }
        if version < 1 {
            return Err(EventError::Validation(format!(
                "version of event {} must be at least 1, got {version}",
                self.id
            )));
        }

        self.version = Some(version);
        debug!(
            event_id = %self.id,
            aggregate_id = %self.aggregate_id,
            version,
            "assigned event version"
        );
        Ok(())
    }

    fn command_id(&self) -> &str {
        &self.command_id
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    fn metadata(&self) -> &MetaData {
        &self.metadata
    }

    fn with_metadata<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMESTAMP: i64 = 1_700_000_000_000;

    fn account_event() -> Event<String> {
        Event::new("evt-1", "acct-42".to_owned(), "cmd-7", TIMESTAMP, ()).unwrap()
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    enum AccountEventKind {
        Opened { owner: String },
        Deposited { amount: u64 },
    }

    impl EventPayload for AccountEventKind {
        fn event_type(&self) -> &'static str {
            match self {
                AccountEventKind::Opened { .. } => "account.opened",
                AccountEventKind::Deposited { .. } => "account.deposited",
            }
        }
    }

    fn summarize<E: DomainEvent>(event: &E) -> String {
        format!(
            "{}@{}#{}",
            event.event_type(),
            event.aggregate_id(),
            event.version().unwrap_or_default()
        )
    }

    #[test]
    fn test_versioned_event_with_metadata_scenario() {
        // Arrange
        let mut event = account_event();

        // Act
        event.set_version(3).unwrap();
        let event = event.with_metadata_entry("source", "test");

        // Assert
        assert_eq!(event.id(), "evt-1");
        assert_eq!(event.aggregate_id(), "acct-42");
        assert_eq!(event.command_id(), "cmd-7");
        assert_eq!(event.timestamp(), TIMESTAMP);
        assert_eq!(event.version(), Some(3));
        assert_eq!(event.metadata_value("source"), Some("test"));
        assert_eq!(event.metadata_value("missing"), None);
    }

    #[test]
    fn test_new_event_has_no_version_and_empty_metadata() {
        let event = account_event();

        assert_eq!(event.version(), None);
        assert!(event.metadata().is_empty());
        assert_eq!(event.event_type(), DEFAULT_EVENT_TYPE);
    }

    #[test]
    fn test_id_is_stable_across_calls() {
        let event = account_event();

        let first = event.id().to_owned();
        let event = event.with_metadata_entry("k", "v");

        assert_eq!(event.id(), first);
        assert_eq!(event.id(), event.id());
    }

    #[test]
    fn test_set_version_twice_is_rejected_and_keeps_first_value() {
        // Arrange
        let mut event = account_event();
        event.set_version(3).unwrap();

        // Act
        let result = event.set_version(4);

        // Assert
        assert_eq!(
            result,
            Err(EventError::VersionAlreadyAssigned {
                event_id: "evt-1".to_owned(),
                current: 3,
                attempted: 4,
            })
        );
        assert_eq!(event.version(), Some(3));
    }

    #[test]
    fn test_set_version_rejects_non_positive_version() {
        let mut event = account_event();

        let result = event.set_version(0);

        match result {
            Err(EventError::Validation(msg)) => {
                assert_eq!(msg, "version of event evt-1 must be at least 1, got 0");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(event.version(), None);
    }

    #[test]
    fn test_with_metadata_is_additive_superset() {
        // Arrange
        let event = account_event().with_metadata_entry("user", "alice");
        let entries = MetaData::from([
            ("ip".to_owned(), "10.0.0.1".to_owned()),
            ("agent".to_owned(), "cli".to_owned()),
        ]);

        // Act
        let merged = event.with_metadata(entries.clone());

        // Assert
        for (key, value) in &entries {
            assert_eq!(merged.metadata().get(key), Some(value));
        }
        assert_eq!(merged.metadata_value("user"), Some("alice"));
        assert_eq!(merged.metadata().len(), 3);
    }

    #[test]
    fn test_with_metadata_overwrites_existing_key() {
        let event = account_event()
            .with_metadata_entry("source", "api")
            .with_metadata([("source", "replay")]);

        assert_eq!(event.metadata_value("source"), Some("replay"));
        assert_eq!(event.metadata().len(), 1);
    }

    #[test]
    fn test_new_rejects_blank_event_id() {
        let result = Event::new("  ", "acct-42".to_owned(), "cmd-7", TIMESTAMP, ());

        match result {
            Err(EventError::Validation(msg)) => assert_eq!(msg, "event id must not be empty"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_blank_command_id() {
        let result = Event::new("evt-1", "acct-42".to_owned(), "", TIMESTAMP, ());

        match result {
            Err(EventError::Validation(msg)) => {
                assert_eq!(msg, "command id of event evt-1 must not be empty");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_occurred_at_converts_epoch_millis() {
        let event = account_event();

        let occurred_at = event.occurred_at().unwrap();

        assert_eq!(occurred_at.timestamp_millis(), TIMESTAMP);
        assert_eq!(occurred_at.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_payload_enum_names_event_type_per_variant() {
        // Arrange
        let opened = Event::new(
            "evt-1",
            42_u64,
            "cmd-1",
            TIMESTAMP,
            AccountEventKind::Opened {
                owner: "alice".to_owned(),
            },
        )
        .unwrap();
        let mut deposited = Event::new(
            "evt-2",
            42_u64,
            "cmd-2",
            TIMESTAMP,
            AccountEventKind::Deposited { amount: 100 },
        )
        .unwrap();
        deposited.set_version(2).unwrap();

        // Act
        let summaries = [summarize(&opened), summarize(&deposited)];

        // Assert
        assert_eq!(summaries, ["account.opened@42#0", "account.deposited@42#2"]);
        assert_eq!(
            deposited.into_payload(),
            AccountEventKind::Deposited { amount: 100 }
        );
    }

    #[test]
    fn test_serialized_shape_omits_unassigned_version() {
        let event = account_event().with_metadata_entry("source", "test");

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": "evt-1",
                "aggregate_id": "acct-42",
                "command_id": "cmd-7",
                "timestamp": TIMESTAMP,
                "metadata": { "source": "test" },
                "payload": null,
            })
        );
    }

    #[test]
    fn test_deserialize_without_metadata_yields_empty_map() {
        let json = serde_json::json!({
            "id": "evt-1",
            "aggregate_id": "acct-42",
            "version": 3,
            "command_id": "cmd-7",
            "timestamp": TIMESTAMP,
            "payload": null,
        });

        let event: Event<String> = serde_json::from_value(json).unwrap();

        assert_eq!(event.version(), Some(3));
        assert!(event.metadata().is_empty());
    }

    #[test]
    fn test_deserialize_without_payload_yields_unit_and_null() {
        // Arrange
        let json = serde_json::json!({
            "id": "evt-1",
            "aggregate_id": "acct-42",
            "command_id": "cmd-7",
            "timestamp": TIMESTAMP,
        });

        // Act
        let unit: Event<String> = serde_json::from_value(json.clone()).unwrap();
        let value: Event<String, serde_json::Value> = serde_json::from_value(json).unwrap();

        // Assert
        assert_eq!(unit, account_event());
        assert_eq!(value.payload(), &serde_json::Value::Null);
    }

    #[test]
    fn test_deserialize_without_payload_fails_for_structured_payload() {
        let json = serde_json::json!({
            "id": "evt-1",
            "aggregate_id": "acct-42",
            "command_id": "cmd-7",
            "timestamp": TIMESTAMP,
        });

        let result = serde_json::from_value::<Event<String, AccountEventKind>>(json);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        // Arrange
        let blank_id = serde_json::json!({
            "id": " ",
            "aggregate_id": "acct-42",
            "command_id": "cmd-7",
            "timestamp": TIMESTAMP,
        });
        let zero_version = serde_json::json!({
            "id": "evt-1",
            "aggregate_id": "acct-42",
            "version": 0,
            "command_id": "cmd-7",
            "timestamp": TIMESTAMP,
        });

        // Act
        let blank_id = serde_json::from_value::<Event<String>>(blank_id).unwrap_err();
        let zero_version = serde_json::from_str::<Event<String>>(&zero_version.to_string()).unwrap_err();

        // Assert
        assert_eq!(
            blank_id.to_string(),
            "validation error: event id must not be empty"
        );
        assert!(
            zero_version
                .to_string()
                .starts_with("validation error: version of event evt-1 must be at least 1, got 0"),
            "{zero_version}"
        );
    }
}
