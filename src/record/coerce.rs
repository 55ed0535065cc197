//! Field coercions
//!
//! Each coercion turns one present JSON value into a typed field value, or
//! explains why it cannot. `field` wraps a coercion with the falsy check and
//! the error context shared by every record kind.

use super::types::Record;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Outcome of a single coercion; the message is wrapped into `Error::Decode`
pub type Coerced<T> = std::result::Result<T, String>;

/// Timestamp layout used by the REST API (`Wed Aug 27 13:08:45 +0000 2008`)
const REST_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Zone-less layouts, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Read `name` from `raw` and coerce it.
///
/// Absent, `null` and `""` yield `Ok(None)`. Zero and `false` are data.
pub(crate) fn field<T>(
    raw: &JsonObject,
    kind: &str,
    name: &str,
    coerce: impl Fn(&JsonValue) -> Coerced<T>,
) -> Result<Option<T>> {
    match raw.get(name) {
        Some(value) if !is_falsy(value) => coerce(value)
            .map(Some)
            .map_err(|message| Error::decode(format!("{kind}.{name}: {message}"))),
        _ => Ok(None),
    }
}

/// True for values that decode to an unset field
pub fn is_falsy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Signed integer from a JSON number or numeric string
pub fn integer(value: &JsonValue) -> Coerced<i64> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| format!("expected integer, got {n}")),
        JsonValue::String(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("expected integer, got {}", describe(value))),
        other => Err(format!("expected integer, got {}", describe(other))),
    }
}

/// Unsigned record ID from a JSON number or numeric string
pub fn id(value: &JsonValue) -> Coerced<u64> {
    match value {
        JsonValue::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("expected non-negative id, got {n}")),
        JsonValue::String(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("expected id, got {}", describe(value))),
        other => Err(format!("expected id, got {}", describe(other))),
    }
}

/// Plain text; numbers and booleans are rendered as text
pub fn text(value: &JsonValue) -> Coerced<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected text, got {}", describe(other))),
    }
}

/// Text with HTML character references and entities decoded
pub fn html(value: &JsonValue) -> Coerced<String> {
    text(value).map(|s| html_escape::decode_html_entities(&s).into_owned())
}

/// Boolean from a JSON bool, 0/1, or "true"/"false"
pub fn flag(value: &JsonValue) -> Coerced<bool> {
    match value {
        JsonValue::Bool(b) => Ok(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(format!("expected boolean, got {n}")),
        },
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(format!("expected boolean, got {}", describe(value))),
        },
        other => Err(format!("expected boolean, got {}", describe(other))),
    }
}

/// Timestamp from a date string or epoch seconds
pub fn timestamp(value: &JsonValue) -> Coerced<DateTime<Utc>> {
    match value {
        JsonValue::String(s) => {
            parse_timestamp(s).ok_or_else(|| format!("unrecognized timestamp {}", describe(value)))
        }
        JsonValue::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| format!("timestamp out of range: {n}")),
        other => Err(format!("expected timestamp, got {}", describe(other))),
    }
}

/// Nested record of another kind
pub fn nested<R: Record>(value: &JsonValue) -> Coerced<Box<R>> {
    R::decode_value(value).map(Box::new).map_err(|e| e.to_string())
}

/// Parse the date layouts the API emits.
///
/// Accepts RFC 2822, the REST layout, RFC 3339, zone-less
/// `YYYY-MM-DD HH:MM[:SS]` (UTC), bare dates and epoch seconds.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, REST_TIMESTAMP_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Short rendering of a JSON value for error messages
pub(crate) fn describe(value: &JsonValue) -> String {
    let rendered = value.to_string();
    if rendered.len() > 40 {
        let cut = rendered
            .char_indices()
            .nth(37)
            .map_or(rendered.len(), |(i, _)| i);
        format!("{}...", &rendered[..cut])
    } else {
        rendered
    }
}
