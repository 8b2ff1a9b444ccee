//! Event construction on behalf of command handlers.

use tracing::debug;

use crate::clock::Clock;
use crate::command::Command;
use crate::error::EventError;
use crate::event::{AggregateId, DomainEvent, Event, EventPayload};
use crate::id::EventIdGenerator;

/// Builds events for a command: a fresh event id, the command's id and
/// metadata, and the clock's current time. Versions are left unassigned;
/// they belong to whoever appends the events.
#[derive(Clone, Copy)]
pub struct EventFactory<'a> {
    clock: &'a dyn Clock,
    ids: &'a dyn EventIdGenerator,
}

impl<'a> EventFactory<'a> {
    /// Creates a new `EventFactory`.
    #[must_use]
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn EventIdGenerator) -> Self {
        Self { clock, ids }
    }

    /// Creates one event produced by `command` for `aggregate_id`.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Validation` if the generated event id or the
    /// command id is blank.
    pub fn create<Id, P>(
        &self,
        command: &dyn Command,
        aggregate_id: Id,
        payload: P,
    ) -> Result<Event<Id, P>, EventError>
    where
        Id: AggregateId,
        P: EventPayload,
    {
        let event = Event::new(
            self.ids.next_id(),
            aggregate_id,
            command.command_id(),
            self.clock.now_millis(),
            payload,
        )?
        .with_metadata(command.metadata());

        debug!(
            event_id = %event.id(),
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            command_type = command.command_type(),
            command_id = %event.command_id(),
            "created event"
        );
        Ok(event)
    }

    /// Creates one event per payload, all sharing the command's id and the
    /// same timestamp.
    ///
    /// # Errors
    ///
    /// Returns the first construction error; no partial batch is returned.
    pub fn create_all<Id, P>(
        &self,
        command: &dyn Command,
        aggregate_id: &Id,
        payloads: impl IntoIterator<Item = P>,
    ) -> Result<Vec<Event<Id, P>>, EventError>
    where
        Id: AggregateId,
        P: EventPayload,
    {
        let timestamp = self.clock.now_millis();
        let metadata = command.metadata();
        payloads
            .into_iter()
            .map(|payload| {
                Event::new(
                    self.ids.next_id(),
                    aggregate_id.clone(),
                    command.command_id(),
                    timestamp,
                    payload,
                )
                .map(|event| event.with_metadata(metadata.clone()))
            })
            .collect()
    }
}

impl std::fmt::Debug for EventFactory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::event::MetaData;

    #[derive(Debug)]
    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[derive(Debug, Default)]
    struct CountingIds(AtomicU64);

    impl EventIdGenerator for CountingIds {
        fn next_id(&self) -> String {
            format!("evt-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    #[derive(Debug)]
    struct OpenAccount {
        command_id: String,
        user: Option<String>,
    }

    impl Command for OpenAccount {
        fn command_type(&self) -> &'static str {
            "account.open"
        }

        fn command_id(&self) -> &str {
            &self.command_id
        }

        fn metadata(&self) -> MetaData {
            self.user
                .iter()
                .map(|user| ("user".to_owned(), user.clone()))
                .collect()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_create_fills_identity_correlation_and_time() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let ids = CountingIds::default();
        let factory = EventFactory::new(&clock, &ids);
        let command = OpenAccount {
            command_id: "cmd-7".to_owned(),
            user: Some("alice".to_owned()),
        };

        // Act
        let event = factory.create(&command, "acct-42".to_owned(), ()).unwrap();

        // Assert
        assert_eq!(event.id(), "evt-1");
        assert_eq!(event.aggregate_id(), "acct-42");
        assert_eq!(event.command_id(), "cmd-7");
        assert_eq!(event.timestamp(), 1_700_000_000_000);
        assert_eq!(event.version(), None);
        assert_eq!(event.metadata_value("user"), Some("alice"));
    }

    #[test]
    fn test_create_all_shares_command_and_timestamp() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let ids = CountingIds::default();
        let factory = EventFactory::new(&clock, &ids);
        let command = OpenAccount {
            command_id: "cmd-9".to_owned(),
            user: None,
        };

        // Act
        let events = factory
            .create_all(&command, &42_u64, [(), (), ()])
            .unwrap();

        // Assert
        let ids: Vec<&str> = events.iter().map(DomainEvent::id).collect();
        assert_eq!(ids, ["evt-1", "evt-2", "evt-3"]);
        assert!(events.iter().all(|e| e.command_id() == "cmd-9"));
        assert!(events.iter().all(|e| e.timestamp() == 1_700_000_000_000));
        assert!(events.iter().all(|e| e.metadata().is_empty()));
    }

    #[test]
    fn test_create_rejects_blank_command_id() {
        let clock = FixedClock(fixed_now());
        let ids = CountingIds::default();
        let factory = EventFactory::new(&clock, &ids);
        let command = OpenAccount {
            command_id: " ".to_owned(),
            user: None,
        };

        let result = factory.create(&command, "acct-42".to_owned(), ());

        assert!(matches!(result, Err(EventError::Validation(_))));
    }
}
