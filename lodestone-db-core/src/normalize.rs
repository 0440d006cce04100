//! Wire-representation normalization
//!
//! The authoritative collapse of heterogeneous wire forms into one canonical
//! in-memory shape. Both the comparator and the index encoder route every
//! value through this module first, so that e.g. a timestamp sent as an
//! ISO-8601 string and the same instant sent as a `{seconds, nanos}` pair
//! compare, hash, and encode identically.
//!
//! ## Failure semantics
//!
//! Two classes only (nothing in between):
//!
//! - Malformed timestamps and invalid base64 are **defects in the caller**:
//!   the user-data parser upstream guarantees well-formed wire data, so a
//!   mismatch here signals a broken invariant and panics loudly.
//! - [`normalize_number`] is deliberately permissive and returns `0.0` for
//!   anything it cannot read. This matches the wire contract, not a
//!   validation layer; callers needing strict validation must do it
//!   upstream.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDateTime;

use crate::value::{BytesValue, TimestampValue, WireNumber};

/// A timestamp collapsed to its canonical `(seconds, nanos)` form.
///
/// The derived ordering (seconds first, then nanos) is the comparison order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedTimestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Nanosecond fraction, `0..=999_999_999`.
    pub nanos: i32,
}

/// Collapse either timestamp wire form to `(seconds, nanos)`.
///
/// ISO strings must match `YYYY-MM-DDTHH:MM:SS(.fraction)?Z` (UTC only); the
/// fraction may carry any precision and is right-padded or truncated to
/// nanoseconds. Pair fields may each arrive as number or string and default
/// to 0 when missing.
///
/// # Panics
///
/// Panics on an ISO string not matching the expected pattern: a defect in
/// the upstream parser, not a recoverable condition.
pub fn normalize_timestamp(timestamp: &TimestampValue) -> NormalizedTimestamp {
    match timestamp {
        TimestampValue::Iso(input) => parse_iso_timestamp(input),
        TimestampValue::Pair { seconds, nanos } => NormalizedTimestamp {
            seconds: normalize_number(seconds.as_ref()) as i64,
            nanos: normalize_number(nanos.as_ref()) as i32,
        },
    }
}

/// Collapse a numeric wire field to `f64`.
///
/// Numbers pass through; strings parse as doubles (including `"NaN"` and
/// `"Infinity"`). Anything else (a missing field, or text that is not a
/// number) yields `0.0`. The permissive default is intentional: it mirrors
/// the wire contract and must not be treated as validation.
pub fn normalize_number(value: Option<&WireNumber>) -> f64 {
    match value {
        Some(WireNumber::Number(n)) => *n,
        Some(WireNumber::Text(s)) => parse_wire_double(s),
        None => 0.0,
    }
}

/// Collapse either blob wire form to a raw byte buffer.
///
/// # Panics
///
/// Panics on invalid base64 (defect in the upstream parser).
pub fn normalize_byte_string(bytes: &BytesValue) -> Vec<u8> {
    match bytes {
        BytesValue::Raw(buf) => buf.clone(),
        BytesValue::Base64(encoded) => STANDARD
            .decode(encoded)
            .unwrap_or_else(|e| panic!("invalid base64 in wire data: {e}")),
    }
}

/// Parse a wire double literal, permissively.
///
/// Accepts decimal literals plus `NaN` / `Infinity` / `-Infinity`
/// (case-insensitive, as the f64 grammar allows); everything else is `0.0`.
pub fn parse_wire_double(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

fn parse_iso_timestamp(input: &str) -> NormalizedTimestamp {
    let body = input
        .strip_suffix('Z')
        .unwrap_or_else(|| fail_timestamp(input));
    let (datetime, fraction) = match body.split_once('.') {
        Some((datetime, fraction)) => (datetime, Some(fraction)),
        None => (body, None),
    };

    let naive = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|_| fail_timestamp(input));

    let nanos = match fraction {
        None => 0,
        Some(digits)
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            fraction_to_nanos(digits)
        }
        Some(_) => fail_timestamp(input),
    };

    NormalizedTimestamp {
        seconds: naive.and_utc().timestamp(),
        nanos,
    }
}

/// Right-pad (or truncate) a fraction-of-a-second digit string to
/// nanosecond precision.
fn fraction_to_nanos(digits: &str) -> i32 {
    digits
        .bytes()
        .take(9)
        .chain(std::iter::repeat(b'0'))
        .take(9)
        .fold(0i32, |acc, b| acc * 10 + (b - b'0') as i32)
}

fn fail_timestamp(input: &str) -> ! {
    panic!("malformed ISO-8601 timestamp in wire data: {input:?}")
}
