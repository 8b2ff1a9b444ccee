//! Serialized event envelope.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::format::Format;

/// Schema version written into every envelope.
pub const SCHEMA_VERSION: u32 = 1;

/// Durable representation of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEvent {
    /// Unique event identifier, copied from the encoded event.
    pub event_id: String,
    /// Event type name for deserialization routing.
    pub event_type: String,
    /// Encoding of `data`.
    pub format: Format,
    /// Envelope schema version.
    pub schema_version: u32,
    /// Lowercase hex SHA-256 digest of `data`.
    pub checksum: String,
    /// The encoded event.
    pub data: Vec<u8>,
}

impl SerializedEvent {
    /// Returns `true` if `data` still hashes to `checksum`.
    #[must_use]
    pub fn is_intact(&self) -> bool {
        checksum(&self.data) == self.checksum
    }
}

/// Computes the lowercase hex SHA-256 digest of `data`.
#[must_use]
pub fn checksum(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
