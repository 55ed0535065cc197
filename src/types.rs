//! Common types used throughout tweetkit
//!
//! This module contains shared type definitions, type aliases,
//! constants and the request parameter mapping.

use std::fmt;
use std::time::Duration;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Constants
// ============================================================================

/// Items requested per page by every paginated resource
pub const PAGE_SIZE: usize = 100;

/// Domain of the REST API
pub const API_DOMAIN: &str = "twitter.com";

/// Domain of the Search API
pub const SEARCH_API_DOMAIN: &str = "search.twitter.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Request Parameters
// ============================================================================

/// A single query or body parameter value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamValue {
    /// Text value
    Text(String),
    /// Integer value
    Int(i64),
    /// No value; never sent
    #[default]
    Absent,
}

impl ParamValue {
    /// Absent values, empty text and zero are falsy and are omitted from requests
    pub fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Text(s) => s.is_empty(),
            ParamValue::Int(n) => *n == 0,
            ParamValue::Absent => true,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Absent => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        // saturates; wire IDs fit in i64
        ParamValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Absent, Into::into)
    }
}

/// Ordered parameter mapping sent as a query string or form body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    /// Create an empty parameter mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace a parameter in place
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of parameters, including falsy ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameter is set at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when nothing would be sent on the wire
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_falsy())
    }

    /// Key/value pairs that will actually be sent, falsy values dropped
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_falsy())
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_falsy() {
        assert!(ParamValue::Absent.is_falsy());
        assert!(ParamValue::Int(0).is_falsy());
        assert!(ParamValue::from("").is_falsy());
        assert!(!ParamValue::Int(7).is_falsy());
        assert!(!ParamValue::from("rust").is_falsy());
    }

    #[test]
    fn test_param_value_from_option() {
        assert_eq!(ParamValue::from(None::<String>), ParamValue::Absent);
        assert_eq!(ParamValue::from(Some("es")), ParamValue::from("es"));
        assert_eq!(ParamValue::from(Some(5_u64)), ParamValue::Int(5));
    }

    #[test]
    fn test_request_params_drop_falsy() {
        let params = RequestParams::new()
            .with("q", "rust")
            .with("page", 2_usize)
            .with("since_id", 0_u64)
            .with("lang", None::<String>)
            .with("geocode", "");

        assert_eq!(params.len(), 5);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("q".to_string(), "rust".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_params_set_replaces() {
        let mut params = RequestParams::new().with("page", 1_usize);
        params.set("page", 3_usize);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("page"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_request_params_blank() {
        assert!(RequestParams::new().is_blank());
        assert!(RequestParams::new().with("max_id", 0_u64).is_blank());
        assert!(!RequestParams::new().with("delete", "1").is_blank());
    }
}
