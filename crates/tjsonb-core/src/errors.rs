use thiserror::Error;
use tjsonb_canonical::{JsonError, TimestampError};

use crate::registry::DatumKind;

/// Errors raised while reading `timestamp|json` text.
///
/// Parsing is all-or-nothing: any of these means no document was built.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text has no `|` separating timestamp and JSON.
    #[error("invalid input format for tjsonb: expected \"<timestamp>|<json>\"")]
    MissingDelimiter,
    /// The part before `|` is not a timestamp.
    #[error("timestamp: {0}")]
    Timestamp(#[from] TimestampError),
    /// The part after `|` is not JSON.
    #[error("json: {0}")]
    JsonSyntax(#[from] JsonError),
}

/// Errors raised when dispatching through the function registry.
#[derive(Error, Debug)]
pub enum CallError {
    /// No function with this name is registered.
    #[error("function {0} is not registered")]
    UnknownFunction(String),
    /// Wrong number of arguments.
    #[error("{name} expects {expected} argument(s), got {actual}")]
    Arity {
        /// Function name.
        name: &'static str,
        /// Declared argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },
    /// An argument has the wrong kind.
    #[error("{name} argument {position} must be {expected}, got {actual}")]
    ArgumentType {
        /// Function name.
        name: &'static str,
        /// One-based argument position.
        position: usize,
        /// Declared kind.
        expected: DatumKind,
        /// Supplied kind.
        actual: DatumKind,
    },
    /// A text argument could not be parsed into a document.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}
