use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::errors::JsonError;

/// Exact decimal number taken from JSON text.
///
/// The literal is kept as written so that output reproduces the input
/// (`1.50` stays `1.50`), while equality and hashing use the numeric value:
/// `1`, `1.0`, `10e-1` and `0.1e1` are all equal, and `-0` equals `0`.
#[derive(Debug, Clone)]
pub struct Numeric {
    text: String,
    value: Decimal,
}

/// `(-1)^negative * digits * 10^exponent` with no leading or trailing zeros
/// in `digits`. Zero is the empty digit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Decimal {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Decimal {
    fn zero() -> Self {
        Self {
            negative: false,
            digits: String::new(),
            exponent: 0,
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(idx) => (&unsigned[..idx], unsigned[idx + 1..].parse::<i64>().ok()?),
            None => (unsigned, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int.is_empty()
            || !int.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let exponent = exponent.checked_sub(i64::try_from(frac.len()).ok()?)?;
        let all_digits = format!("{int}{frac}");
        let significant = all_digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Some(Self::zero());
        }
        let dropped = i64::try_from(significant.len() - trimmed.len()).ok()?;

        Some(Self {
            negative,
            digits: trimmed.to_string(),
            exponent: exponent.checked_add(dropped)?,
        })
    }
}

impl Numeric {
    /// Parses a JSON number literal.
    pub fn parse(text: &str) -> Result<Self, JsonError> {
        let value =
            Decimal::parse(text).ok_or_else(|| JsonError::InvalidNumber(text.to_string()))?;
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    /// Builds a number from a finite float; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Self::parse(&value.to_string()).ok()
    }

    /// The literal as it was written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Nearest `f64`; values beyond the float range become infinite.
    pub fn to_f64(&self) -> f64 {
        self.text.parse().unwrap_or(f64::NAN)
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Numeric {}

impl Hash for Numeric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl FromStr for Numeric {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

macro_rules! numeric_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Numeric {
                fn from(value: $ty) -> Self {
                    let text = value.to_string();
                    let value = Decimal::parse(&text).unwrap_or_else(Decimal::zero);
                    Self { text, value }
                }
            }
        )*
    };
}

numeric_from_int!(i32, i64, u32, u64);
