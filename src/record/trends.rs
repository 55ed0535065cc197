//! Trend snapshots
//!
//! Trends are not paginated: one response holds every period's list.

use super::coerce::{self, describe};
use super::models::Trend;
use super::types::Record;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Trending topics grouped by the time they were measured
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendSet {
    /// When the API computed this snapshot
    pub as_of: Option<DateTime<Utc>>,
    /// Trends per measurement time, oldest first
    pub trends: BTreeMap<DateTime<Utc>, Vec<Trend>>,
}

impl TrendSet {
    /// Decode a `{"as_of": ..., "trends": {"<date>": [..]}}` response
    pub fn decode(raw: &JsonValue) -> Result<Self> {
        let object = raw.as_object().ok_or_else(|| {
            Error::decode(format!(
                "expected a JSON object for trends, got {}",
                describe(raw)
            ))
        })?;

        let as_of = coerce::field(object, "trends", "as_of", coerce::timestamp)?;

        let mut trends: BTreeMap<DateTime<Utc>, Vec<Trend>> = BTreeMap::new();
        match object.get("trends") {
            Some(JsonValue::Object(periods)) => {
                for (date, entries) in periods {
                    let at = coerce::parse_timestamp(date).ok_or_else(|| {
                        Error::decode(format!("trends: unrecognized period '{date}'"))
                    })?;
                    let entries = entries.as_array().ok_or_else(|| {
                        Error::decode(format!(
                            "trends.{date}: expected a list, got {}",
                            describe(entries)
                        ))
                    })?;
                    let bucket = trends.entry(at).or_default();
                    for entry in entries {
                        bucket.push(Trend::decode_value(entry)?);
                    }
                }
            }
            Some(JsonValue::Null) | None => {}
            Some(other) => {
                return Err(Error::decode(format!(
                    "trends: expected an object, got {}",
                    describe(other)
                )))
            }
        }

        Ok(Self { as_of, trends })
    }

    /// Trends measured at `at`
    pub fn at(&self, at: &DateTime<Utc>) -> Option<&[Trend]> {
        self.trends.get(at).map(Vec::as_slice)
    }

    /// The most recent measurement
    pub fn latest(&self) -> Option<(&DateTime<Utc>, &[Trend])> {
        self.trends
            .iter()
            .next_back()
            .map(|(at, list)| (at, list.as_slice()))
    }

    /// Number of measurement periods
    pub fn len(&self) -> usize {
        self.trends.len()
    }

    /// True when the snapshot holds no periods
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }
}
