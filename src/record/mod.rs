//! Record decoder module
//!
//! Supports: User, Status, SearchResult, Trend (plus the unpaginated TrendSet)
//!
//! # Overview
//!
//! Each record kind is declared as a fixed table of `(field, coercion)` pairs.
//! Decoding walks that table against a raw JSON object: absent, `null` and
//! empty-string values become `None`, everything else goes through the
//! field's coercion and a failed coercion is reported as `Error::Decode`.

#[macro_use]
mod macros;

pub mod coerce;
mod models;
mod trends;
mod types;

pub use coerce::parse_timestamp;
pub use models::{SearchResult, Status, Trend, User};
pub use trends::TrendSet;
pub use types::{Identified, Record};
