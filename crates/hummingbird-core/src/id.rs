//! Event identifier generation.
//!
//! In production, ids are time-ordered UUIDs. In tests and replays, a
//! sequential or recorded implementation is injected.

use uuid::Uuid;

/// Source of unique event identifiers.
pub trait EventIdGenerator: Send + Sync {
    /// Returns an identifier that has not been handed out before.
    fn next_id(&self) -> String;
}

/// Generates UUID v7 identifiers, which sort by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidEventIdGenerator;

impl EventIdGenerator for UuidEventIdGenerator {
    fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}
