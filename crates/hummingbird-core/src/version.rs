//! Version assignment for pending events.
//!
//! The component that appends events to an aggregate stream knows the
//! aggregate's current version; every pending event gets the version the
//! aggregate reaches once that event is applied.

use tracing::debug;

use crate::error::EventError;
use crate::event::DomainEvent;

/// Numbers `events` as `current_version + 1 ..= current_version + n` and
/// returns the aggregate version after the last one.
///
/// Nothing is modified unless every event can be versioned.
///
/// # Errors
///
/// Returns `EventError::Validation` if `current_version` is negative or
/// the batch would overflow `i64`, and `EventError::VersionAlreadyAssigned`
/// if any event already carries a version.
pub fn assign_versions<E: DomainEvent>(
    events: &mut [E],
    current_version: i64,
) -> Result<i64, EventError> {
    if current_version < 0 {
        return Err(EventError::Validation(format!(
            "current version must not be negative, got {current_version}"
        )));
    }

    let count = i64::try_from(events.len())
        .map_err(|_| EventError::Validation("too many events in batch".into()))?;
    let new_version = current_version.checked_add(count).ok_or_else(|| {
        EventError::Validation(format!(
            "assigning {count} versions after {current_version} overflows"
        ))
    })?;

    if let Some((event, current)) = events
        .iter()
        .find_map(|e| e.version().map(|v| (e, v)))
    {
        return Err(EventError::VersionAlreadyAssigned {
            event_id: event.id().to_owned(),
            current,
            attempted: current_version + 1,
        });
    }

    let mut next = current_version;
    for event in events.iter_mut() {
        next += 1;
        event.set_version(next)?;
    }

    debug!(
        current_version,
        new_version,
        count,
        "assigned versions to pending events"
    );
    Ok(new_version)
}
