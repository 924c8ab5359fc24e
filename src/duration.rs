//! Human-readable durations such as `10s`, `1m0s` or `1.5ms`.
//!
//! A duration is a sequence of decimal numbers, each with an optional fraction and
//! a unit suffix. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
//! The bare string `0` is also accepted.
//!
//! [`format`] produces the canonical text: hours, minutes and (fractional) seconds
//! for durations of one second or more, a single sub-second unit otherwise.
//!
//! `std::time::Duration` fields are recognised by the serializer and deserializer
//! without any attribute. The [`serialize`] and [`deserialize`] functions exist for
//! `#[serde(with = "serde_ini::duration")]`, which also makes other serde formats
//! use the same text.
//!
//! ```rust
//! use std::time::Duration;
//!
//! assert_eq!(serde_ini::duration::parse("1m30s").unwrap(), Duration::from_secs(90));
//! assert_eq!(serde_ini::duration::format(Duration::from_secs(60)), "1m0s");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

// Fraction digits past this point are below nanosecond resolution for every unit.
const MAX_FRACTION_DIGITS: usize = 20;

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parses a duration string.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for malformed text, unknown units and negative
/// durations, and [`Error::Overflow`] when the total does not fit a `Duration`.
///
/// # Examples
///
/// ```rust
/// use serde_ini::duration::parse;
/// use std::time::Duration;
///
/// assert_eq!(parse("10s").unwrap(), Duration::from_secs(10));
/// assert_eq!(parse("1.5ms").unwrap(), Duration::from_micros(1500));
/// assert!(parse("10").is_err());
/// ```
pub fn parse(text: &str) -> Result<Duration> {
    let invalid = || Error::invalid_value(text, "duration");

    let mut rest = text;
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('-') {
        if stripped != "0" {
            return Err(Error::invalid_value(text, "non-negative duration"));
        }
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let whole = &rest[..int_end];
        rest = &rest[int_end..];

        let mut fraction = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            fraction = &after_dot[..end];
            rest = &after_dot[end..];
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];
        if unit.is_empty() {
            return Err(Error::invalid_value(text, "duration with a unit suffix"));
        }
        let scale = unit_scale(unit).ok_or_else(invalid)?;

        let overflow = || Error::overflow(text, "Duration");
        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for digit in fraction.bytes().take(MAX_FRACTION_DIGITS) {
            numerator = numerator * 10 + u128::from(digit - b'0');
            denominator *= 10;
        }
        nanos = nanos
            .checked_add(numerator * scale / denominator)
            .ok_or_else(overflow)?;
        total = total.checked_add(nanos).ok_or_else(overflow)?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| Error::overflow(text, "Duration"))?;
    // The remainder is below one second, so it always fits.
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Formats a duration in its canonical text form.
///
/// # Examples
///
/// ```rust
/// use serde_ini::duration::format;
/// use std::time::Duration;
///
/// assert_eq!(format(Duration::ZERO), "0s");
/// assert_eq!(format(Duration::from_secs(10)), "10s");
/// assert_eq!(format(Duration::from_secs(3_600)), "1h0m0s");
/// assert_eq!(format(Duration::from_millis(1_500)), "1.5s");
/// assert_eq!(format(Duration::from_micros(250)), "250µs");
/// ```
#[must_use]
pub fn format(duration: Duration) -> String {
    let total = duration.as_nanos();
    if total == 0 {
        return "0s".to_string();
    }

    if total < NANOS_PER_SEC {
        let (unit, scale) = if total < 1_000 {
            ("ns", 1)
        } else if total < 1_000_000 {
            ("µs", 1_000)
        } else {
            ("ms", 1_000_000)
        };
        return format!("{}{}", decimal(total, scale), unit);
    }

    let secs = duration.as_secs();
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());

    let mut output = String::new();
    if hours > 0 {
        let _ = write!(output, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(output, "{}m", minutes);
    }
    output.push_str(&decimal(seconds, NANOS_PER_SEC));
    output.push('s');
    output
}

/// Renders `value / scale` with the shortest exact fraction.
fn decimal(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", fraction, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Serializes a `Duration` as canonical duration text.
pub fn serialize<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(*duration))
}

/// Deserializes a `Duration` from duration text.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}
