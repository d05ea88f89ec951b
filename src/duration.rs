//! Whole-second durations and their textual form
//!
//! Durations are written `H:MM:SS` from one hour upwards and `M:SS` below it.
//! Parsing accepts one or two digits for minutes and seconds (0-59) and any number
//! of digits for hours, so every duration survives a format/parse round trip.

use crate::error::{ParseError, RacePaceError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Shape the request layer accepts before attempting a parse.
/// Deliberately loose: "6:3:0:" passes here and fails in [`Duration::parse`].
static QUERY_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^:]*(:[^:]*:?[^:]*|[^:]*:)$").ok());

/// A non-negative span of time with one-second resolution.
///
/// Used both for elapsed times and, wrapped in [`crate::pace::Pace`], for time per
/// unit distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(u64);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_secs(secs: u64) -> Self {
        Duration(secs)
    }

    pub const fn from_mins(mins: u64) -> Self {
        Duration(mins * SECONDS_PER_MINUTE)
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn as_minutes_f64(&self) -> f64 {
        self.0 as f64 / SECONDS_PER_MINUTE as f64
    }

    /// Build a duration from fractional seconds, dropping the sub-second part.
    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(RacePaceError::invalid_input("duration", "seconds", secs));
        }
        // Snap to whole microseconds first so 399.99999999997 reads as 400
        let snapped = (secs * 1_000_000.0).round() / 1_000_000.0;
        // u64::MAX as f64 is 2^64, the first value that no longer fits
        if snapped.trunc() >= u64::MAX as f64 {
            return Err(RacePaceError::invalid_input("duration", "seconds", secs));
        }
        Ok(Duration(snapped.trunc() as u64))
    }

    /// Build a duration from a signed second count produced by pace arithmetic.
    pub fn from_signed_secs(secs: i64) -> Result<Self> {
        u64::try_from(secs)
            .map(Duration)
            .map_err(|_| RacePaceError::invalid_input("duration", "seconds", secs))
    }

    /// Split into (hours, minutes, seconds)
    pub fn hms(&self) -> (u64, u64, u64) {
        let hours = self.0 / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.0 % SECONDS_PER_MINUTE;
        (hours, minutes, seconds)
    }

    /// Parse `H:MM:SS` or `M:SS`.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        let fields: Vec<&str> = text.split(':').collect();
        match fields.as_slice() {
            [h, m, s] => {
                let hours = parse_hours(text, h)?;
                let minutes = parse_field(text, m, "minutes", 59)?;
                let seconds = parse_field(text, s, "seconds", 59)?;
                hours
                    .checked_mul(SECONDS_PER_HOUR)
                    .and_then(|secs| {
                        secs.checked_add(minutes as u64 * SECONDS_PER_MINUTE + seconds as u64)
                    })
                    .map(Duration)
                    .ok_or_else(|| ParseError::Overflow {
                        input: text.to_string(),
                    })
            }
            [m, s] => {
                let minutes = parse_field(text, m, "minutes", 59)?;
                let seconds = parse_field(text, s, "seconds", 59)?;
                Ok(Duration(minutes as u64 * SECONDS_PER_MINUTE + seconds as u64))
            }
            _ => Err(ParseError::FieldCount {
                input: text.to_string(),
            }),
        }
    }

    /// Canonical text: `H:MM:SS` from one hour upwards, otherwise `M:SS`.
    pub fn format(&self) -> String {
        let (hours, minutes, seconds) = self.hms();
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

fn parse_hours(input: &str, field: &str) -> std::result::Result<u64, ParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NonNumeric {
            input: input.to_string(),
            field: "hours",
        });
    }
    field.bytes().try_fold(0u64, |acc, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u64::from(b - b'0')))
            .ok_or_else(|| ParseError::Overflow {
                input: input.to_string(),
            })
    })
}

fn parse_field(
    input: &str,
    field: &str,
    name: &'static str,
    max: u32,
) -> std::result::Result<u32, ParseError> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NonNumeric {
            input: input.to_string(),
            field: name,
        });
    }

    // At most two ASCII digits, cannot overflow
    let value = field.bytes().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    if value > max {
        return Err(ParseError::OutOfRange {
            input: input.to_string(),
            field: name,
            value,
            max,
        });
    }
    Ok(value)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Duration::parse(s)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Duration::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Permissive digits-and-colons check applied to raw query text.
pub fn matches_query_shape(text: &str) -> bool {
    QUERY_SHAPE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text))
}

/// Shape check followed by a real parse, for untrusted request input.
pub fn parse_query_value(text: &str) -> Result<Duration> {
    if !matches_query_shape(text) {
        return Err(ParseError::Shape {
            input: text.to_string(),
        }
        .into());
    }
    Ok(Duration::parse(text)?)
}

/// Re-punctuate digits as they are typed into a time field.
///
/// `"2435"` becomes `"24:35"` and `"32435"` becomes `"3:24:35"`. Anything that is
/// not a digit is dropped first.
pub fn mask_time_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let d = digits.as_str();
    match d.len() {
        0..=2 => digits,
        3 => format!("{}:{}", &d[..1], &d[1..3]),
        4 => format!("{}:{}", &d[..2], &d[2..]),
        5 => format!("{}:{}:{}", &d[..1], &d[1..3], &d[3..5]),
        len => format!("{}:{}:{}", &d[..2], &d[2..4], &d[4..len.min(8)]),
    }
}
