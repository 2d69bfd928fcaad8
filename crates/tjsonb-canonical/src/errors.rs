use thiserror::Error;

/// Errors raised while reading timestamp text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The text is not in any recognised timestamp layout.
    #[error("invalid input syntax for timestamp: \"{0}\"")]
    Syntax(String),
    /// The layout is recognised but a field (month, hour, offset...) is out of range.
    #[error("timestamp field value out of range: \"{0}\"")]
    OutOfRange(String),
}

/// Errors raised while reading JSON text.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The text is not valid JSON.
    #[error("invalid input syntax for JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    /// A number literal cannot be represented exactly (exponent overflow).
    #[error("invalid numeric value: {0}")]
    InvalidNumber(String),
}
