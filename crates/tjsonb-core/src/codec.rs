use chrono::{FixedOffset, Offset, Utc};
use tjsonb_canonical::{format_json, format_timestamp, parse_json, parse_timestamp};
use tjsonb_canonical::{JsonStyle, TimestampStyle};
use tracing::debug;

use crate::document::TimestampedDocument;
use crate::errors::ParseError;

/// Separates the timestamp from the JSON text on the wire.
pub const DELIMITER: char = '|';

/// Options for reading and writing the wire text.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Layout of the timestamp part on output (default: `Postgres`).
    pub timestamp_style: TimestampStyle,
    /// Layout of the JSON part on output (default: `Compact`).
    pub json_style: JsonStyle,
    /// Zone applied to timestamp text that carries none (default: UTC).
    pub default_offset: FixedOffset,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            timestamp_style: TimestampStyle::default(),
            json_style: JsonStyle::default(),
            default_offset: Utc.fix(),
        }
    }
}

/// Reads and writes `timestamp|json` text.
///
/// # Example
///
/// ```rust
/// use tjsonb_core::{CodecOptions, DocumentCodec, JsonStyle, TimestampStyle};
///
/// let codec = DocumentCodec::new(CodecOptions {
///     timestamp_style: TimestampStyle::Rfc3339,
///     json_style: JsonStyle::Spaced,
///     ..CodecOptions::default()
/// });
/// let doc = codec.parse(r#"2024-05-01 08:00:00+02|{"a":[1,2]}"#)?;
/// assert_eq!(codec.format(&doc), r#"2024-05-01T06:00:00Z|{"a": [1, 2]}"#);
/// # Ok::<(), tjsonb_core::ParseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentCodec {
    options: CodecOptions,
}

impl DocumentCodec {
    /// Creates a codec with the given options.
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Parses wire text.
    ///
    /// The text is split at the first `|`; everything before it is timestamp
    /// text and everything after it is JSON text. A `|` inside the JSON part
    /// (in a string) is therefore fine, but the timestamp part cannot contain
    /// one.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingDelimiter`] if there is no `|`
    /// - [`ParseError::Timestamp`] if the timestamp part is rejected
    /// - [`ParseError::JsonSyntax`] if the JSON part is rejected
    pub fn parse(&self, text: &str) -> Result<TimestampedDocument, ParseError> {
        let Some((timestamp_text, json_text)) = text.split_once(DELIMITER) else {
            debug!(len = text.len(), "wire text has no delimiter");
            return Err(ParseError::MissingDelimiter);
        };

        let timestamp = parse_timestamp(timestamp_text, self.options.default_offset)?;
        let document = parse_json(json_text).map_err(|err| {
            debug!(error = %err, "rejected JSON part of wire text");
            err
        })?;

        Ok(TimestampedDocument::new(timestamp, document))
    }

    /// Formats a document as wire text.
    pub fn format(&self, doc: &TimestampedDocument) -> String {
        format!(
            "{}{}{}",
            format_timestamp(doc.timestamp(), self.options.timestamp_style),
            DELIMITER,
            format_json(doc.document(), self.options.json_style)
        )
    }
}

/// Parses wire text with default options.
pub fn parse(text: &str) -> Result<TimestampedDocument, ParseError> {
    DocumentCodec::default().parse(text)
}

/// Formats a document as wire text with default options.
pub fn format(doc: &TimestampedDocument) -> String {
    DocumentCodec::default().format(doc)
}
