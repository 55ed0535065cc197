//! Pagination types and traits
//!
//! Defines the page cache, the per-sequence cursor state and the request
//! policy contract every paginated resource implements.

use crate::error::{Error, Result};
use crate::record::coerce::describe;
use crate::record::{Identified, Record};
use crate::types::{JsonValue, RequestParams};
use std::ops::Range;

// ============================================================================
// Slots and the page cache
// ============================================================================

/// One logical offset in a page cache
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot<T> {
    /// Never requested
    #[default]
    Unfetched,
    /// Requested, but past the end of the data or suppressed as a duplicate
    Empty,
    /// Holds a record
    Present(T),
}

impl<T> Slot<T> {
    /// Check if the slot still needs a fetch
    pub fn is_unfetched(&self) -> bool {
        matches!(self, Self::Unfetched)
    }

    /// Check if the slot holds a record
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The record, if present
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(item) => Some(item),
            _ => None,
        }
    }
}

/// Dense slot storage indexed by absolute offset across all pages.
///
/// Slots between the last written page and a newly written one are
/// back-filled as `Unfetched`. A written slot never goes back to `Unfetched`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCache<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for PageCache<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> PageCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots held, written or back-filled
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing has been fetched yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at `offset`, or `None` past the end of the storage
    pub fn slot(&self, offset: usize) -> Option<&Slot<T>> {
        self.slots.get(offset)
    }

    /// Record at `offset`, if that slot is present
    pub fn get(&self, offset: usize) -> Option<&T> {
        self.slots.get(offset).and_then(Slot::as_present)
    }

    /// First offset in `range` not yet known: an `Unfetched` slot, or the
    /// first offset past the end of the storage.
    pub fn first_missing(&self, range: Range<usize>) -> Option<usize> {
        if range.is_empty() {
            return None;
        }
        let covered_end = range.end.min(self.slots.len());
        let covered_start = range.start.min(covered_end);
        if let Some(pos) = self.slots[covered_start..covered_end]
            .iter()
            .position(Slot::is_unfetched)
        {
            return Some(covered_start + pos);
        }
        (range.end > self.slots.len()).then(|| range.start.max(self.slots.len()))
    }

    /// Present records in `range`, in order
    pub fn present(&self, range: Range<usize>) -> impl Iterator<Item = &T> {
        let end = range.end.min(self.slots.len());
        let start = range.start.min(end);
        self.slots[start..end].iter().filter_map(Slot::as_present)
    }

    /// Write one page: `items` fill the first slots from `start`, the rest of
    /// the `page_size` window becomes `Empty`.
    pub fn store_page(&mut self, start: usize, page_size: usize, items: Vec<T>) {
        if self.slots.len() < start {
            self.slots.resize_with(start, || Slot::Unfetched);
        }

        let mut items = items.into_iter();
        for offset in start..start + page_size {
            let slot = items.next().map_or(Slot::Empty, Slot::Present);
            if offset < self.slots.len() {
                self.slots[offset] = slot;
            } else {
                self.slots.push(slot);
            }
        }
    }
}

// ============================================================================
// Cursor state
// ============================================================================

/// Mutable per-sequence metadata carried across fetches
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CursorState {
    /// Caller's lower bound; also the floor ID for duplicate suppression
    pub since_id: u64,
    /// Largest ID observed so far; persists for the sequence's lifetime
    pub max_id: u64,
    /// Server-side duration of the last search, in seconds
    pub completed_in: Option<f64>,
    /// Next offset for restartable iteration
    pub position: usize,
}

impl CursorState {
    /// Create state with a caller-supplied `since_id`
    pub fn new(since_id: u64) -> Self {
        Self {
            since_id,
            ..Default::default()
        }
    }

    /// Raise the running maximum ID
    pub fn observe_max_id(&mut self, id: u64) {
        self.max_id = self.max_id.max(id);
    }

    /// `since_id` to send: only until a `max_id` is known, because the API
    /// mishandles the two together.
    pub fn effective_since_id(&self) -> Option<u64> {
        (self.max_id == 0).then_some(self.since_id)
    }
}

// ============================================================================
// Request policy
// ============================================================================

/// Resource-specific behavior plugged into a `PagedSequence`
pub trait RequestPolicy: Send + Sync {
    /// Record kind the resource returns
    type Item: Record + Identified + Clone + Send + Sync;

    /// Query parameters for 1-based `page`
    fn page_params(&self, page: usize, state: &CursorState) -> RequestParams;

    /// Raw item list inside a decoded response
    fn items<'a>(&self, response: &'a JsonValue) -> Result<&'a [JsonValue]>;

    /// Merge response metadata into the cursor state after a fetch.
    /// `fresh` holds the decoded items that survived duplicate suppression.
    fn absorb(
        &self,
        _response: &JsonValue,
        _fresh: &[Self::Item],
        _state: &mut CursorState,
    ) -> Result<()> {
        Ok(())
    }

    /// Items with an ID at or below this value are treated as already seen
    fn floor_id(&self, state: &CursorState) -> u64 {
        state.since_id
    }
}

/// Response that is itself the item list
pub(crate) fn bare_list<'a>(kind: &str, response: &'a JsonValue) -> Result<&'a [JsonValue]> {
    response.as_array().map(Vec::as_slice).ok_or_else(|| {
        Error::decode(format!(
            "expected a list of {kind} records, got {}",
            describe(response)
        ))
    })
}
