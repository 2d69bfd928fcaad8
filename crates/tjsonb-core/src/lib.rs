//! Timestamped JSON documents.
//!
//! This crate provides:
//! - [`TimestampedDocument`], an immutable `{timestamp, document}` pair
//! - the `timestamp|json` text codec ([`DocumentCodec`], [`parse`], [`format`])
//! - predicates over pairs of documents ([`overlaps`], [`range_report`])
//! - aggregation over collections ([`average_scalar`], [`average_field`])
//! - an explicit function registry for hosts that dispatch by name
//!
//! Core invariants:
//! - A document is either fully parsed or not constructed at all
//! - Comparison and aggregation never fail; only parsing returns errors
//! - No global state; a host registers functions by calling
//!   [`FunctionRegistry::register_builtins`] once at startup
//!
//! ## Quick Start
//!
//! ```rust
//! use tjsonb_core::{average_scalar, overlaps, parse, range_report, RangeReport};
//!
//! let a = parse(r#"2024-01-01 00:00:00+00|{"speed": 10}"#)?;
//! let b = parse(r#"2024-01-01T00:00:00Z|{"speed": 10}"#)?;
//! assert!(overlaps(&a, &b));
//! assert_eq!(range_report(&a, &b), RangeReport::OverlapFound);
//!
//! let readings = [parse("2024-01-01|3")?, parse("2024-01-02|\"x\"")?, parse("2024-01-03|5")?];
//! assert_eq!(average_scalar(&readings), Some(4.0));
//! # Ok::<(), tjsonb_core::ParseError>(())
//! ```
//!
#![deny(missing_docs)]

/// Aggregation over document collections.
pub mod aggregate;
/// `timestamp|json` text codec and its options.
pub mod codec;
/// The timestamped document value type.
pub mod document;
/// Error types for core operations.
pub mod errors;
/// Predicates over pairs of documents.
pub mod predicates;
/// Name-based function dispatch for hosts.
pub mod registry;

pub use aggregate::{average_field, average_scalar};
pub use codec::{format, parse, CodecOptions, DocumentCodec};
pub use document::TimestampedDocument;
pub use errors::{CallError, ParseError};
pub use predicates::{overlaps, range_report, RangeReport};
pub use registry::{Datum, DatumKind, FunctionDef, FunctionRegistry};

pub use tjsonb_canonical::{JsonStyle, JsonValue, Timestamp, TimestampStyle};
