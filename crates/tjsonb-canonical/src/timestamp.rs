use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, SubsecRound, TimeZone,
    Utc,
};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::errors::TimestampError;

const PATTERN: &str = r"^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})(?:[Tt ]+(?P<hour>\d{2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?:\.(?P<frac>\d{1,9}))?)?)?\s*(?P<tz>[Zz]|(?i:utc)|[+-]\d{2}(?::?\d{2})?)?$";

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PATTERN).expect("invalid regex"))
}

/// Absolute point in time, normalised to UTC, with microsecond resolution.
///
/// Ordering and equality follow the instant itself, so `12:00+02` and
/// `10:00Z` are the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(DateTime<Utc>);

/// Text layout used when rendering a [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampStyle {
    /// `2024-01-01 12:00:00.25+00`, the host database's `timestamptz` output.
    #[default]
    Postgres,
    /// `2024-01-01T12:00:00.25Z`.
    Rfc3339,
}

impl Timestamp {
    /// Wraps a UTC date-time, rounding to the nearest microsecond.
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.round_subsecs(6))
    }

    /// Builds a timestamp from microseconds since the Unix epoch.
    pub fn from_unix_micros(micros: i64) -> Option<Self> {
        Utc.timestamp_micros(micros).single().map(Self)
    }

    /// Microseconds since the Unix epoch.
    pub fn unix_micros(&self) -> i64 {
        self.0.timestamp_micros()
    }

    /// The underlying UTC date-time.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses timestamp text, reading zone-less input as UTC.
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        parse_timestamp(text, Utc.fix())
    }
}

/// Parses timestamp text.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and
/// `HH:MM[:SS[.fraction]]`, optionally followed by `Z`, `UTC` or a numeric
/// offset (`+05`, `+0530`, `-05:30`). The literal `epoch` is also accepted,
/// and `24:00:00` reads as midnight of the next day.
/// Text without a zone is read in `default_offset`.
pub fn parse_timestamp(
    text: &str,
    default_offset: FixedOffset,
) -> Result<Timestamp, TimestampError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("epoch") {
        return Ok(Timestamp::default());
    }

    let syntax = || TimestampError::Syntax(text.to_string());
    let out_of_range = || TimestampError::OutOfRange(text.to_string());

    let Some(caps) = pattern().captures(trimmed) else {
        debug!(input = text, "rejected timestamp text");
        return Err(syntax());
    };
    let field = |name: &str| -> Result<u32, TimestampError> {
        caps.name(name)
            .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| syntax()))
    };

    let year = i32::try_from(field("year")?).map_err(|_| out_of_range())?;
    let date =
        NaiveDate::from_ymd_opt(year, field("month")?, field("day")?).ok_or_else(out_of_range)?;
    let nanos: u32 = match caps.name("frac") {
        Some(m) => format!("{:0<9}", m.as_str()).parse().map_err(|_| syntax())?,
        None => 0,
    };
    let (hour, minute, second) = (field("hour")?, field("minute")?, field("second")?);
    // `24:00:00` is midnight of the following day.
    let (date, time) = if (hour, minute, second, nanos) == (24, 0, 0, 0) {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(out_of_range)?;
        (date.succ_opt().ok_or_else(out_of_range)?, midnight)
    } else {
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
            .ok_or_else(out_of_range)?;
        (date, time)
    };
    let offset = match caps.name("tz") {
        Some(m) => parse_offset(m.as_str()).ok_or_else(out_of_range)?,
        None => default_offset,
    };

    let local = NaiveDateTime::new(date, time);
    let instant = offset
        .from_local_datetime(&local)
        .single()
        .ok_or_else(out_of_range)?;
    Ok(Timestamp::from_datetime(instant.with_timezone(&Utc)))
}

/// Parses a zone suffix: `Z`, `UTC`, `+HH`, `+HHMM` or `+HH:MM` (and the `-`
/// forms). Minutes must be below 60.
pub fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let digits = rest.replace(':', "");
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Renders a timestamp in UTC.
///
/// Fractional seconds are printed only when non-zero, without trailing zeros.
pub fn format_timestamp(ts: &Timestamp, style: TimestampStyle) -> String {
    let (layout, zone) = match style {
        TimestampStyle::Postgres => ("%Y-%m-%d %H:%M:%S", "+00"),
        TimestampStyle::Rfc3339 => ("%Y-%m-%dT%H:%M:%S", "Z"),
    };
    let mut out = ts.0.format(layout).to_string();
    let micros = ts.0.timestamp_subsec_micros();
    if micros != 0 {
        out.push('.');
        out.push_str(format!("{micros:06}").trim_end_matches('0'));
    }
    out.push_str(zone);
    out
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(self, TimestampStyle::Rfc3339))
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
