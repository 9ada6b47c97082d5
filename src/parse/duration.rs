//! Display duration: `3s`, `1m30s`, `500ms`; `0` = stay until clicked

use std::time::Duration;

use super::cursor::Cursor;
use crate::error::ParseError;

/// Unit suffix → nanoseconds (longest suffix first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1e3),
    ("µs", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3600e9),
];

/// Parse a display duration. `None` = indefinite.
///
/// Accepts a sequence of `<decimal><unit>` terms. A bare number is seconds.
pub fn parse_duration(input: &str) -> Result<Option<Duration>, ParseError> {
    let fail = |reason| ParseError::Duration {
        input: input.to_string(),
        reason,
    };

    if input.is_empty() {
        return Err(fail("empty duration"));
    }
    if input.starts_with('-') {
        return Err(fail("negative duration"));
    }

    let mut cursor = Cursor::new(input);
    let mut nanos = 0.0_f64;
    while !cursor.is_eof() {
        let (number, rest) = cursor.consume_while(|c| c.is_ascii_digit() || c == '.');
        if number.is_empty() {
            return Err(fail("expected a number"));
        }
        let value: f64 = number.parse().map_err(|_| fail("invalid number"))?;

        let (unit, rest) = rest.consume_while(|c| !c.is_ascii_digit() && c != '.');
        let scale = if unit.is_empty() {
            // bare number only allowed as the whole input
            if cursor.remaining() != input {
                return Err(fail("missing unit"));
            }
            1e9
        } else {
            UNITS
                .iter()
                .find(|(suffix, _)| *suffix == unit)
                .map(|(_, scale)| *scale)
                .ok_or_else(|| fail("unknown unit"))?
        };

        nanos += value * scale;
        cursor = rest;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(fail("duration out of range"));
    }
    // sub-nanosecond totals round to zero, which means indefinite too
    match nanos.round() as u64 {
        0 => Ok(None),
        nanos => Ok(Some(Duration::from_nanos(nanos))),
    }
}
