//! Event error types.

use thiserror::Error;

/// Top-level error type for event construction, versioning and encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// An event or argument violated a structural invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// `set_version` was called on an event that already carries a version.
    #[error("version already assigned on event {event_id}: current {current}, attempted {attempted}")]
    VersionAlreadyAssigned {
        /// The event that was already versioned.
        event_id: String,
        /// The version the event carries.
        current: i64,
        /// The version that was rejected.
        attempted: i64,
    },

    /// Encoding or decoding an event failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A serialized event was written with a schema this build cannot read.
    #[error("unsupported schema version {found}, supported {supported}")]
    UnsupportedSchema {
        /// Schema version found in the envelope.
        found: u32,
        /// Schema version this build reads and writes.
        supported: u32,
    },

    /// The serialized bytes do not match the envelope checksum.
    #[error("checksum mismatch on event {event_id}")]
    ChecksumMismatch {
        /// The event whose data was altered.
        event_id: String,
    },

    /// An encoding format name was not recognised.
    #[error("unknown format: {0}")]
    UnknownFormat(String),
}
