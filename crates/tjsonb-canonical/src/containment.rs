use tracing::trace;

use crate::iterator::{JsonIterator, Token};
use crate::value::JsonValue;

/// Compares two scalar values.
///
/// Strings compare by exact character sequence, numbers by numeric value
/// (`1.0 == 1`), booleans by value, and `null` equals `null`. Any other
/// pairing, including a container on either side, is unequal.
pub fn scalars_equal(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::String(x), JsonValue::String(y)) => x == y,
        (JsonValue::Number(x), JsonValue::Number(y)) => x == y,
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x == y,
        (JsonValue::Null, JsonValue::Null) => true,
        _ => false,
    }
}

/// Walks both documents in lock-step and reports whether they agree
/// position by position.
///
/// This is a prefix comparison over the flattened token streams, not a
/// subset test:
///
/// - container markers and object keys are compared by kind only, so
///   `{"x": 1}` matches `{"y": 1}`;
/// - scalars must satisfy [`scalars_equal`];
/// - the walk succeeds as soon as either stream runs out. A stream whose
///   remaining tokens are only closing markers counts as run out, which is
///   why `{"x": 1, "y": 2}` matches `{"x": 1}` in both argument orders.
///
/// ```
/// use tjsonb_canonical::{parse_json, structurally_matches};
///
/// let a = parse_json(r#"{"x": 1, "y": 2}"#)?;
/// let b = parse_json(r#"{"x": 1}"#)?;
/// assert!(structurally_matches(&a, &b));
///
/// let c = parse_json(r#"{"x": "1"}"#)?;
/// assert!(!structurally_matches(&b, &c));
/// # Ok::<(), tjsonb_canonical::JsonError>(())
/// ```
pub fn structurally_matches(a: &JsonValue, b: &JsonValue) -> bool {
    let mut left = JsonIterator::new(a);
    let mut right = JsonIterator::new(b);
    let mut position = 0usize;

    loop {
        let l = left.next_token();
        let r = right.next_token();
        if l == Token::Done || r == Token::Done {
            return true;
        }

        if !l.same_kind(&r) {
            if l.is_closing() && left.all(|t| t.is_closing()) {
                trace!(position, "left document exhausted");
                return true;
            }
            if r.is_closing() && right.all(|t| t.is_closing()) {
                trace!(position, "right document exhausted");
                return true;
            }
            trace!(position, left = ?l, right = ?r, "token kinds differ");
            return false;
        }

        if let (Token::Scalar(x), Token::Scalar(y)) = (l, r) {
            if !scalars_equal(x, y) {
                trace!(position, left = %x, right = %y, "scalar values differ");
                return false;
            }
        }
        position += 1;
    }
}
