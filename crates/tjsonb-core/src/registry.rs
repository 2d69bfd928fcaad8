use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::aggregate::average_scalar;
use crate::codec::DocumentCodec;
use crate::document::TimestampedDocument;
use crate::errors::CallError;
use crate::predicates::{overlaps, range_report};

/// A value passed to or returned from a registered function.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// SQL-style absent value.
    Null,
    /// Boolean result.
    Bool(bool),
    /// Floating-point result.
    Float(f64),
    /// Text argument or result.
    Text(String),
    /// A single document.
    Document(TimestampedDocument),
    /// A collection of documents.
    Documents(Vec<TimestampedDocument>),
}

/// Kind tag of a [`Datum`], used in signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumKind {
    /// [`Datum::Null`].
    Null,
    /// [`Datum::Bool`].
    Bool,
    /// [`Datum::Float`].
    Float,
    /// [`Datum::Text`].
    Text,
    /// [`Datum::Document`].
    Document,
    /// [`Datum::Documents`].
    Documents,
}

impl Datum {
    /// The kind tag of this value.
    pub fn kind(&self) -> DatumKind {
        match self {
            Datum::Null => DatumKind::Null,
            Datum::Bool(_) => DatumKind::Bool,
            Datum::Float(_) => DatumKind::Float,
            Datum::Text(_) => DatumKind::Text,
            Datum::Document(_) => DatumKind::Document,
            Datum::Documents(_) => DatumKind::Documents,
        }
    }

    /// Renders the value as text, formatting documents with `codec`.
    pub fn render(&self, codec: &DocumentCodec) -> String {
        match self {
            Datum::Null => "null".to_string(),
            Datum::Bool(b) => b.to_string(),
            Datum::Float(f) => f.to_string(),
            Datum::Text(s) => s.clone(),
            Datum::Document(doc) => codec.format(doc),
            Datum::Documents(docs) => docs
                .iter()
                .map(|doc| codec.format(doc))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl fmt::Display for DatumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatumKind::Null => "null",
            DatumKind::Bool => "boolean",
            DatumKind::Float => "float8",
            DatumKind::Text => "text",
            DatumKind::Document => "tjsonb",
            DatumKind::Documents => "tjsonb[]",
        })
    }
}

/// Function body.
///
/// Through [`FunctionRegistry::call`] the arguments have already been checked
/// against the signature. Bodies can also be invoked directly through
/// [`FunctionDef::body`], so each one still rejects arguments of the wrong
/// count or kind with a [`CallError`] instead of panicking.
pub type Builtin = fn(&DocumentCodec, Vec<Datum>) -> Result<Datum, CallError>;

/// A named, typed function a host can dispatch to.
#[derive(Clone, Copy)]
pub struct FunctionDef {
    /// Unique name.
    pub name: &'static str,
    /// Argument kinds, in order.
    pub args: &'static [DatumKind],
    /// Result kind when the result is not null.
    pub returns: DatumKind,
    /// Implementation; see [`Builtin`] for calling it directly.
    pub body: Builtin,
}

impl FunctionDef {
    /// Human-readable signature, e.g. `tjsonb_out(tjsonb) -> text`.
    pub fn signature(&self) -> String {
        let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
        format!("{}({}) -> {}", self.name, args.join(", "), self.returns)
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

const BUILTINS: &[FunctionDef] = &[
    FunctionDef {
        name: "tjsonb_in",
        args: &[DatumKind::Text],
        returns: DatumKind::Document,
        body: tjsonb_in,
    },
    FunctionDef {
        name: "tjsonb_out",
        args: &[DatumKind::Document],
        returns: DatumKind::Text,
        body: tjsonb_out,
    },
    FunctionDef {
        name: "tjsonb_overlaps",
        args: &[DatumKind::Document, DatumKind::Document],
        returns: DatumKind::Bool,
        body: tjsonb_overlaps,
    },
    FunctionDef {
        name: "tjsonb_range",
        args: &[DatumKind::Document, DatumKind::Document],
        returns: DatumKind::Text,
        body: tjsonb_range,
    },
    FunctionDef {
        name: "tjsonb_aggregate_speed",
        args: &[DatumKind::Documents],
        returns: DatumKind::Float,
        body: tjsonb_aggregate_speed,
    },
];

/// Name-based dispatch table.
///
/// Starts empty. A host calls [`register_builtins`](Self::register_builtins)
/// once at startup; calling it again changes nothing. Registries are plain
/// values, so independent hosts in one process do not see each other.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in functions installed.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Adds a function. Returns `false` if the name was already taken, in
    /// which case the existing definition is kept.
    pub fn register(&mut self, def: FunctionDef) -> bool {
        if self.functions.contains_key(def.name) {
            return false;
        }
        debug!(function = def.name, "registered function");
        self.functions.insert(def.name, def);
        true
    }

    /// Installs the built-in functions; returns how many were newly added.
    pub fn register_builtins(&mut self) -> usize {
        let mut added = 0;
        for def in BUILTINS {
            if self.register(*def) {
                added += 1;
            }
        }
        added
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Registered functions in name order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.values()
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Calls a function by name.
    ///
    /// Arguments are checked against the signature first. Any [`Datum::Null`]
    /// argument short-circuits to a null result without running the body.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] if the name is unknown, the arguments do not fit
    /// the signature, or the body fails.
    pub fn call(
        &self,
        name: &str,
        codec: &DocumentCodec,
        args: Vec<Datum>,
    ) -> Result<Datum, CallError> {
        let def = self
            .get(name)
            .ok_or_else(|| CallError::UnknownFunction(name.to_string()))?;

        if args.len() != def.args.len() {
            return Err(CallError::Arity {
                name: def.name,
                expected: def.args.len(),
                actual: args.len(),
            });
        }
        if args.iter().any(|arg| arg.kind() == DatumKind::Null) {
            return Ok(Datum::Null);
        }
        for (idx, (arg, expected)) in args.iter().zip(def.args).enumerate() {
            if arg.kind() != *expected {
                return Err(CallError::ArgumentType {
                    name: def.name,
                    position: idx + 1,
                    expected: *expected,
                    actual: arg.kind(),
                });
            }
        }

        debug!(function = def.name, "calling function");
        (def.body)(codec, args)
    }
}

fn mismatch(
    name: &'static str,
    position: usize,
    expected: DatumKind,
    actual: &Datum,
) -> CallError {
    CallError::ArgumentType {
        name,
        position,
        expected,
        actual: actual.kind(),
    }
}

fn document_pair(
    name: &'static str,
    args: Vec<Datum>,
) -> Result<(TimestampedDocument, TimestampedDocument), CallError> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(Datum::Document(a)), Some(Datum::Document(b))) => Ok((a, b)),
        (Some(Datum::Document(_)), Some(other)) => {
            Err(mismatch(name, 2, DatumKind::Document, &other))
        }
        (Some(Datum::Document(_)), None) => Err(CallError::Arity {
            name,
            expected: 2,
            actual: 1,
        }),
        (Some(other), _) => Err(mismatch(name, 1, DatumKind::Document, &other)),
        (None, _) => Err(CallError::Arity {
            name,
            expected: 2,
            actual: 0,
        }),
    }
}

fn first(name: &'static str, args: Vec<Datum>) -> Result<Datum, CallError> {
    args.into_iter().next().ok_or(CallError::Arity {
        name,
        expected: 1,
        actual: 0,
    })
}

fn tjsonb_in(codec: &DocumentCodec, args: Vec<Datum>) -> Result<Datum, CallError> {
    match first("tjsonb_in", args)? {
        Datum::Text(text) => Ok(Datum::Document(codec.parse(&text)?)),
        other => Err(mismatch("tjsonb_in", 1, DatumKind::Text, &other)),
    }
}

fn tjsonb_out(codec: &DocumentCodec, args: Vec<Datum>) -> Result<Datum, CallError> {
    match first("tjsonb_out", args)? {
        Datum::Document(doc) => Ok(Datum::Text(codec.format(&doc))),
        other => Err(mismatch("tjsonb_out", 1, DatumKind::Document, &other)),
    }
}

fn tjsonb_overlaps(_codec: &DocumentCodec, args: Vec<Datum>) -> Result<Datum, CallError> {
    let (a, b) = document_pair("tjsonb_overlaps", args)?;
    Ok(Datum::Bool(overlaps(&a, &b)))
}

fn tjsonb_range(_codec: &DocumentCodec, args: Vec<Datum>) -> Result<Datum, CallError> {
    let (start, end) = document_pair("tjsonb_range", args)?;
    Ok(Datum::Text(range_report(&start, &end).as_str().to_string()))
}

fn tjsonb_aggregate_speed(_codec: &DocumentCodec, args: Vec<Datum>) -> Result<Datum, CallError> {
    match first("tjsonb_aggregate_speed", args)? {
        Datum::Documents(docs) => Ok(average_scalar(&docs).map_or(Datum::Null, Datum::Float)),
        other => Err(mismatch(
            "tjsonb_aggregate_speed",
            1,
            DatumKind::Documents,
            &other,
        )),
    }
}
