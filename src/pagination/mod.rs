//! Pagination module
//!
//! Supports: user lists, user timelines, search results
//!
//! # Overview
//!
//! A `PagedSequence` is one generic engine parameterized by a
//! `RequestPolicy`. The policy supplies the page request parameters, locates
//! the item list in a response, and merges cursor metadata after each fetch.
//! The engine owns the page cache and decides which pages to fetch.
//!
//! Iteration stops at the first absent slot. A page truncated by the
//! boundary-duplicate check therefore ends iteration there, even when later
//! pages hold more records.

mod sequence;
mod strategies;
mod types;

pub use sequence::{PagedSequence, MAX_INDEX};
pub use strategies::{SearchPolicy, TimelinePolicy, UserListPolicy};
pub use types::{CursorState, PageCache, RequestPolicy, Slot};
