use std::mem;
use std::slice;

use crate::value::JsonValue;

/// One step of a depth-first pre-order walk over a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Start of an array.
    BeginArray,
    /// End of an array.
    EndArray,
    /// Start of an object.
    BeginObject,
    /// End of an object.
    EndObject,
    /// Object member key; the member's value follows.
    Key(&'a str),
    /// Null, boolean, number or string.
    Scalar(&'a JsonValue),
    /// The walk is over. Returned forever once reached.
    Done,
}

impl Token<'_> {
    /// Compares variants only, ignoring payloads.
    pub fn same_kind(&self, other: &Token<'_>) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Returns `true` for `EndArray` and `EndObject`.
    pub fn is_closing(&self) -> bool {
        matches!(self, Token::EndArray | Token::EndObject)
    }
}

enum Frame<'a> {
    Pending(&'a JsonValue),
    Array(slice::Iter<'a, JsonValue>),
    Object(indexmap::map::Iter<'a, String, JsonValue>),
}

enum Step<'a> {
    Enter(&'a JsonValue),
    Member(&'a str, &'a JsonValue),
    Close(Token<'a>),
    Finished,
}

/// Lazy token stream over a borrowed JSON tree.
///
/// Keeps an explicit stack of open containers instead of recursing, so
/// traversal depth is bounded by heap, not by the call stack. Build a fresh
/// iterator for every walk; nothing is shared between instances.
pub struct JsonIterator<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> JsonIterator<'a> {
    /// Starts a walk at `root`.
    pub fn new(root: &'a JsonValue) -> Self {
        Self {
            stack: vec![Frame::Pending(root)],
        }
    }

    /// Pulls the next token; [`Token::Done`] once the root has been closed.
    pub fn next_token(&mut self) -> Token<'a> {
        let step = match self.stack.last_mut() {
            None => Step::Finished,
            Some(Frame::Pending(value)) => Step::Enter(*value),
            Some(Frame::Array(items)) => match items.next() {
                Some(item) => Step::Enter(item),
                None => Step::Close(Token::EndArray),
            },
            Some(Frame::Object(members)) => match members.next() {
                Some((key, item)) => Step::Member(key.as_str(), item),
                None => Step::Close(Token::EndObject),
            },
        };

        match step {
            Step::Finished => Token::Done,
            Step::Enter(value) => {
                if matches!(self.stack.last(), Some(Frame::Pending(_))) {
                    self.stack.pop();
                }
                self.enter(value)
            }
            Step::Member(key, value) => {
                self.stack.push(Frame::Pending(value));
                Token::Key(key)
            }
            Step::Close(token) => {
                self.stack.pop();
                token
            }
        }
    }

    fn enter(&mut self, value: &'a JsonValue) -> Token<'a> {
        match value {
            JsonValue::Array(items) => {
                self.stack.push(Frame::Array(items.iter()));
                Token::BeginArray
            }
            JsonValue::Object(members) => {
                self.stack.push(Frame::Object(members.iter()));
                Token::BeginObject
            }
            scalar => Token::Scalar(scalar),
        }
    }
}

impl<'a> Iterator for JsonIterator<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Token::Done => None,
            token => Some(token),
        }
    }
}

impl std::iter::FusedIterator for JsonIterator<'_> {}
