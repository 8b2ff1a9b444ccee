//! Command abstractions.

use crate::event::MetaData;

/// Trait that all commands implement.
///
/// A command is the origin of the events it produces: its id becomes the
/// `command_id` of every resulting event, which makes it the correlation
/// key for a whole transaction.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Identifier of this command instance.
    fn command_id(&self) -> &str;

    /// Metadata copied onto every event the command produces, e.g. audit
    /// information such as the acting user.
    fn metadata(&self) -> MetaData {
        MetaData::new()
    }
}
