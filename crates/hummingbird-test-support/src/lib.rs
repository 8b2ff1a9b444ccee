//! Shared test doubles and utilities for the Hummingbird event-sourcing
//! framework.

mod clock;
mod command;
mod id;

pub use clock::FixedClock;
pub use command::TestCommand;
pub use id::{FixedIdGenerator, SequenceIdGenerator};
