//! Test command — a `Command` with a caller-chosen id and metadata.

use hummingbird_core::command::Command;
use hummingbird_core::event::MetaData;

/// A command that carries only what event construction reads from it.
#[derive(Debug, Clone, Default)]
pub struct TestCommand {
    /// The command identifier.
    pub command_id: String,
    /// Metadata copied onto produced events.
    pub metadata: MetaData,
}

impl TestCommand {
    /// Create a command with the given id and no metadata.
    #[must_use]
    pub fn new(command_id: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            metadata: MetaData::new(),
        }
    }

    /// Adds one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Command for TestCommand {
    fn command_type(&self) -> &'static str {
        "test.command"
    }

    fn command_id(&self) -> &str {
        &self.command_id
    }

    fn metadata(&self) -> MetaData {
        self.metadata.clone()
    }
}
