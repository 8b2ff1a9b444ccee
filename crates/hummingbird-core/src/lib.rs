//! Hummingbird Core — the domain event contract.
//!
//! This crate defines what a domain event exposes (identity, aggregate
//! linkage, version, command correlation, timestamp, metadata) and the
//! small collaborators that construct and version events. It contains no
//! storage or dispatch code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod factory;
pub mod id;
pub mod version;

pub use error::EventError;
pub use event::{AggregateId, DomainEvent, Event, EventPayload, MetaData};
