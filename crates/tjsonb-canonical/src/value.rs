use std::fmt::{self, Write};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::JsonError;
use crate::numeric::Numeric;

/// Object members in insertion (parse) order, keys unique.
pub type JsonMap = IndexMap<String, JsonValue>;

/// A decoded JSON document.
///
/// Each container exclusively owns its children; there are no back
/// references. Values are never mutated once built, which is what lets the
/// iterator hand out borrowed tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Exact decimal number.
    Number(Numeric),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<JsonValue>),
    /// Ordered mapping with unique keys.
    Object(JsonMap),
}

/// Text layout used when rendering a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// No insignificant whitespace: `{"a":1,"b":[1,2]}`.
    #[default]
    Compact,
    /// One space after `,` and `:`, as the host database prints jsonb:
    /// `{"a": 1, "b": [1, 2]}`.
    Spaced,
}

impl JsonValue {
    /// Returns `true` for `Null`, `Bool`, `Number` and `String`.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    /// Returns the number if this value is one.
    pub fn as_number(&self) -> Option<&Numeric> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the members if this value is an object.
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up an object member; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// JSON type name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Borrows this value as something that renders in the given style.
    pub fn styled(&self, style: JsonStyle) -> Styled<'_> {
        Styled { value: self, style }
    }
}

/// Parses JSON text into a [`JsonValue`].
pub fn parse_json(text: &str) -> Result<JsonValue, JsonError> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    JsonValue::try_from(raw)
}

/// Renders a [`JsonValue`] as JSON text.
pub fn format_json(value: &JsonValue, style: JsonStyle) -> String {
    value.styled(style).to_string()
}

/// A [`JsonValue`] paired with a [`JsonStyle`] for display.
#[derive(Debug, Clone, Copy)]
pub struct Styled<'a> {
    value: &'a JsonValue,
    style: JsonStyle,
}

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.value, self.style)
    }
}

fn write_value<W: Write>(out: &mut W, value: &JsonValue, style: JsonStyle) -> fmt::Result {
    let (comma, colon) = match style {
        JsonStyle::Compact => (",", ":"),
        JsonStyle::Spaced => (", ", ": "),
    };
    match value {
        JsonValue::Null => out.write_str("null"),
        JsonValue::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.write_str(n.as_str()),
        JsonValue::String(s) => write_string(out, s),
        JsonValue::Array(items) => {
            out.write_char('[')?;
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.write_str(comma)?;
                }
                write_value(out, item, style)?;
            }
            out.write_char(']')
        }
        JsonValue::Object(map) => {
            out.write_char('{')?;
            for (idx, (key, item)) in map.iter().enumerate() {
                if idx > 0 {
                    out.write_str(comma)?;
                }
                write_string(out, key)?;
                out.write_str(colon)?;
                write_value(out, item, style)?;
            }
            out.write_char('}')
        }
    }
}

fn write_string<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    let escaped = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    out.write_str(&escaped)
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, JsonStyle::Compact)
    }
}

impl FromStr for JsonValue {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_json(s)
    }
}

impl TryFrom<serde_json::Value> for JsonValue {
    type Error = JsonError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => JsonValue::Number(Numeric::parse(&n.to_string())?),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(JsonValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(key, item)| Ok((key, JsonValue::try_from(item)?)))
                    .collect::<Result<_, JsonError>>()?,
            ),
        })
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => serde_json::Number::from_str(n.as_str())
                .map_err(S::Error::custom)?
                .serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, item) in members {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        JsonValue::try_from(raw).map_err(D::Error::custom)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Number(Numeric::from(value))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(Numeric::from(value))
    }
}

impl From<Numeric> for JsonValue {
    fn from(value: Numeric) -> Self {
        JsonValue::Number(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<T: IntoIterator<Item = (K, JsonValue)>>(iter: T) -> Self {
        JsonValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
