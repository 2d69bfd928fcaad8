use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tjsonb_canonical::{JsonValue, Timestamp};

use crate::codec::DocumentCodec;
use crate::errors::ParseError;

/// A JSON document stamped with the instant it describes.
///
/// Both parts are always present and valid; there is no way to observe a
/// half-built value. The document owns its JSON tree and is never mutated,
/// so it can be shared across threads freely.
///
/// `FromStr`/`Display` use the `timestamp|json` wire text with default
/// [`CodecOptions`](crate::CodecOptions); serde uses the structured form
/// `{"timestamp": ..., "document": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampedDocument {
    timestamp: Timestamp,
    document: JsonValue,
}

impl TimestampedDocument {
    /// Pairs an already-validated timestamp and document.
    pub fn new(timestamp: Timestamp, document: JsonValue) -> Self {
        Self {
            timestamp,
            document,
        }
    }

    /// The instant.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// The JSON tree.
    pub fn document(&self) -> &JsonValue {
        &self.document
    }

    /// Splits into timestamp and document.
    pub fn into_parts(self) -> (Timestamp, JsonValue) {
        (self.timestamp, self.document)
    }
}

impl FromStr for TimestampedDocument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentCodec::default().parse(s)
    }
}

impl fmt::Display for TimestampedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DocumentCodec::default().format(self))
    }
}
