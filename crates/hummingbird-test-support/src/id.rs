//! Test id generators — deterministic `EventIdGenerator` implementations.

use std::sync::Mutex;

use hummingbird_core::id::EventIdGenerator;

/// Hands out `"{prefix}-1"`, `"{prefix}-2"`, ... in order.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    prefix: String,
    next: Mutex<u64>,
}

impl SequenceIdGenerator {
    /// Create a generator whose ids start at `{prefix}-1`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Mutex::new(1),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::new("evt")
    }
}

impl EventIdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        let mut next = self.next.lock().unwrap();
        let id = format!("{}-{}", self.prefix, *next);
        *next += 1;
        id
    }
}

/// Returns the same id on every call. Useful for exercising duplicate-id and
/// blank-id paths.
#[derive(Debug, Clone)]
pub struct FixedIdGenerator(pub String);

impl EventIdGenerator for FixedIdGenerator {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}
