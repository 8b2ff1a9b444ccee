//! Hummingbird Serialization — durable encodings for domain events.
//!
//! Events are written as JSON or YAML documents, optionally wrapped in a
//! [`SerializedEvent`] envelope that records the event type, schema version
//! and a SHA-256 checksum of the encoded bytes.

pub mod envelope;
pub mod format;
pub mod serializer;

pub use envelope::{SCHEMA_VERSION, SerializedEvent};
pub use format::Format;
pub use serializer::EventSerializer;
