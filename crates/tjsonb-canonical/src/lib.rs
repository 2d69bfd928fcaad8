//! JSON document model, traversal and timestamp primitives for tjsonb.
//!
//! Everything that decides whether two documents match lives in this crate:
//! the [`JsonValue`] tree, the token stream produced by [`JsonIterator`], and
//! the lock-step comparator in [`containment`]. Timestamp and JSON text
//! conversion go through [`parse_timestamp`], [`format_timestamp`],
//! [`parse_json`] and [`format_json`].
//!
#![deny(missing_docs)]

/// Positional structural comparison over token streams.
pub mod containment;
/// Error types for timestamp and JSON text.
pub mod errors;
/// Depth-first token iterator over JSON trees.
pub mod iterator;
/// Exact decimal numbers.
pub mod numeric;
/// UTC timestamps with microsecond resolution.
pub mod timestamp;
/// The JSON tree model and its text form.
pub mod value;

pub use containment::{scalars_equal, structurally_matches};
pub use errors::{JsonError, TimestampError};
pub use iterator::{JsonIterator, Token};
pub use numeric::Numeric;
pub use timestamp::{
    format_timestamp, parse_offset, parse_timestamp, Timestamp, TimestampStyle,
};
pub use value::{format_json, parse_json, JsonMap, JsonStyle, JsonValue};
