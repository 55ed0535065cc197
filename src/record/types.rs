//! Record traits
//!
//! Defines the decoding contract shared by every record kind.

use super::coerce::describe;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// An immutable value object decoded from one JSON object
pub trait Record: Sized {
    /// Short name used in error messages (e.g. "user")
    const KIND: &'static str;

    /// Declared field names, in declaration order
    const FIELDS: &'static [&'static str];

    /// Decode from a raw JSON object
    fn decode(raw: &JsonObject) -> Result<Self>;

    /// Decode from any JSON value, failing unless it is an object
    fn decode_value(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Self::decode(map),
            other => Err(Error::decode(format!(
                "expected a JSON object for {}, got {}",
                Self::KIND,
                describe(other)
            ))),
        }
    }
}

/// Records carrying a numeric ID, used for the boundary-duplicate check
pub trait Identified {
    /// The record's ID, if it was present in the source
    fn record_id(&self) -> Option<u64>;
}
