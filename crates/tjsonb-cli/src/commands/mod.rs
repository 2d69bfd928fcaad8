//! Subcommand implementations and the state they share.

use std::io::{self, Read};

use thiserror::Error;
use tjsonb_core::{
    CallError, CodecOptions, Datum, DatumKind, DocumentCodec, FunctionRegistry,
    TimestampedDocument,
};

pub mod average;
pub mod functions;
pub mod normalize;
pub mod overlaps;
pub mod range;

/// Errors surfaced to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Input { path: String, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),
    #[error("line {line}: {source}")]
    Line { line: usize, source: Box<CliError> },
    #[error(transparent)]
    Call(#[from] CallError),
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{function} returned {kind}")]
    UnexpectedResult {
        function: &'static str,
        kind: DatumKind,
    },
}

/// Codec and function registry for one invocation.
pub struct Context {
    pub codec: DocumentCodec,
    pub registry: FunctionRegistry,
}

impl Context {
    pub fn new(options: CodecOptions) -> Self {
        let mut registry = FunctionRegistry::new();
        registry.register_builtins();
        Self {
            codec: DocumentCodec::new(options),
            registry,
        }
    }

    pub fn call(&self, function: &str, args: Vec<Datum>) -> Result<Datum, CallError> {
        self.registry.call(function, &self.codec, args)
    }

    /// Parses wire text through `tjsonb_in`.
    pub fn parse(&self, text: &str) -> Result<TimestampedDocument, CliError> {
        match self.call("tjsonb_in", vec![Datum::Text(text.to_string())])? {
            Datum::Document(doc) => Ok(doc),
            other => Err(CliError::UnexpectedResult {
                function: "tjsonb_in",
                kind: other.kind(),
            }),
        }
    }

    /// Parses every non-blank line of the input.
    pub fn read_documents(
        &self,
        input: Option<String>,
    ) -> Result<Vec<TimestampedDocument>, CliError> {
        let text = read_input(input)?;
        let mut docs = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let doc = self.parse(line).map_err(|source| CliError::Line {
                line: idx + 1,
                source: Box::new(source),
            })?;
            docs.push(doc);
        }
        tracing::debug!(count = docs.len(), "read documents");
        Ok(docs)
    }
}

/// Reads a file, or stdin when no path is given.
pub fn read_input(input: Option<String>) -> Result<String, CliError> {
    match input {
        Some(path) => {
            std::fs::read_to_string(&path).map_err(|source| CliError::Input { path, source })
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}
