//! Lazily fetched, cached sequence of records
//!
//! A `PagedSequence` presents a remote resource as a 0-based sequence. Pages
//! are fetched on demand through the transport and kept for the lifetime of
//! the sequence, so repeated reads never hit the network twice.

use super::types::{CursorState, PageCache, RequestPolicy};
use crate::error::{Error, Result};
use crate::http::{FetchRequest, Transport};
use crate::record::{Identified, Record};
use crate::types::PAGE_SIZE;
use futures::stream::{self, Stream};
use std::sync::Arc;
use tracing::debug;

/// Largest offset a sequence accepts. The cache is dense, so reading offset
/// `n` allocates `n` slots; the API never serves anywhere near this many.
pub const MAX_INDEX: usize = 100_000;

/// Result of a single page fetch
#[derive(Debug)]
struct PageOutcome {
    /// Items the server returned
    returned: usize,
    /// Items kept after duplicate suppression
    fresh: usize,
}

/// Paginated resource backed by a page cache.
///
/// Access is serialized through `&mut self`: one sequence never issues two
/// fetches at once. Share a sequence across tasks behind a mutex.
pub struct PagedSequence<P: RequestPolicy> {
    transport: Arc<dyn Transport>,
    path: String,
    domain: Option<String>,
    policy: P,
    cache: PageCache<P::Item>,
    state: CursorState,
}

impl<P: RequestPolicy> PagedSequence<P> {
    /// Create a sequence over `path` on the transport's default domain
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>, policy: P) -> Self {
        Self {
            transport,
            path: path.into(),
            domain: None,
            policy,
            cache: PageCache::new(),
            state: CursorState::default(),
        }
    }

    /// Send requests to `domain` instead of the transport's default
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Only return records newer than `since_id`
    #[must_use]
    pub fn with_since_id(mut self, since_id: u64) -> Self {
        self.state.since_id = since_id;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Cursor metadata gathered so far
    pub fn cursor(&self) -> &CursorState {
        &self.state
    }

    /// Slots fetched so far
    pub fn cache(&self) -> &PageCache<P::Item> {
        &self.cache
    }

    /// The remote resources do not report a total, so this always fails
    /// with `Error::UnknownLength`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Result<usize> {
        Err(Error::UnknownLength)
    }

    /// Record at `index`, fetching its page if needed.
    ///
    /// Returns `Ok(None)` for offsets past the end of the data and for
    /// slots suppressed as boundary duplicates. Indexes above `MAX_INDEX`
    /// fail with `Error::InvalidIndex`.
    pub async fn get(&mut self, index: i64) -> Result<Option<P::Item>> {
        let index = checked_index(index)?;
        self.ensure(index, 1).await?;
        Ok(self.cache.get(index).cloned())
    }

    /// Present records in `start..stop`, in order.
    ///
    /// With `stop` set to `None` one page past `start` is fetched and every
    /// cached record from `start` on is returned. Empty slots are skipped.
    pub async fn get_range(&mut self, start: i64, stop: Option<i64>) -> Result<Vec<P::Item>> {
        let start = checked_index(start)?;
        let stop = stop.map(checked_index).transpose()?;

        let end = match stop {
            Some(stop) => {
                if stop > start {
                    self.ensure(start, stop - start).await?;
                }
                stop
            }
            None => {
                self.ensure(start, PAGE_SIZE).await?;
                self.cache.len()
            }
        };

        Ok(self.cache.present(start..end).cloned().collect())
    }

    /// Restart iteration at offset 0
    pub fn rewind(&mut self) {
        self.state.position = 0;
    }

    /// Next record of the current iteration.
    ///
    /// Iteration ends at the first absent slot, even if records follow it.
    pub async fn next_item(&mut self) -> Result<Option<P::Item>> {
        let position = i64::try_from(self.state.position).unwrap_or(i64::MAX);
        let item = self.get(position).await?;
        if item.is_some() {
            self.state.position += 1;
        }
        Ok(item)
    }

    /// Iterate from offset 0 as a stream
    pub fn stream(&mut self) -> impl Stream<Item = Result<P::Item>> + Send + '_ {
        self.rewind();
        stream::try_unfold(self, |seq| async move {
            let next = seq.next_item().await?;
            Ok::<_, Error>(next.map(|item| (item, seq)))
        })
    }

    /// Fetch pages until `start..start + limit` is covered or the data ends
    async fn ensure(&mut self, start: usize, limit: usize) -> Result<()> {
        let mut offset = start;
        let mut remaining = limit;

        loop {
            let end = offset.saturating_add(remaining);
            let Some(missing) = self.cache.first_missing(offset..end) else {
                break;
            };

            let page = missing / PAGE_SIZE + 1;
            let page_start = (page - 1) * PAGE_SIZE;
            let page_end = page_start + PAGE_SIZE;

            let outcome = self.fetch_page(page).await?;
            if outcome.returned < PAGE_SIZE {
                break;
            }
            // newest first: a page with nothing above the floor means every
            // later page is at or below it too
            if outcome.fresh == 0 {
                debug!("Page {} of {} holds no fresh items, stopping", page, self.path);
                break;
            }

            let window_start = offset.max(page_start);
            let contributed = (page_start + outcome.fresh)
                .min(end)
                .saturating_sub(window_start);
            remaining = end.saturating_sub(window_start + contributed);
            offset = page_end;
        }

        Ok(())
    }

    /// Fetch and cache one 1-based page
    async fn fetch_page(&mut self, page: usize) -> Result<PageOutcome> {
        let params = self.policy.page_params(page, &self.state);
        let request = FetchRequest::new(self.path.clone())
            .domain(self.domain.clone())
            .query(params);

        debug!(
            "Fetching page {} of {} ({})",
            page,
            self.path,
            self.domain.as_deref().unwrap_or("default domain")
        );

        let response = self.transport.fetch(request).await?;
        let raw = self.policy.items(&response)?;
        let returned = raw.len();
        let floor = self.policy.floor_id(&self.state);

        let mut fresh = Vec::with_capacity(returned.min(PAGE_SIZE));
        for (position, value) in raw.iter().take(PAGE_SIZE).enumerate() {
            let item = <P::Item as Record>::decode_value(value)?;
            if floor > 0 && item.record_id().is_some_and(|id| id <= floor) {
                debug!(
                    "Page {} of {}: item {} at or below floor ID {}, dropping the rest",
                    page, self.path, position, floor
                );
                break;
            }
            fresh.push(item);
        }

        self.policy.absorb(&response, &fresh, &mut self.state)?;

        let outcome = PageOutcome {
            returned,
            fresh: fresh.len(),
        };
        debug!(
            "Page {} of {}: {} returned, {} fresh",
            page, self.path, outcome.returned, outcome.fresh
        );

        self.cache.store_page((page - 1) * PAGE_SIZE, PAGE_SIZE, fresh);
        Ok(outcome)
    }
}

impl<P: RequestPolicy + std::fmt::Debug> std::fmt::Debug for PagedSequence<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedSequence")
            .field("path", &self.path)
            .field("domain", &self.domain)
            .field("policy", &self.policy)
            .field("cached_slots", &self.cache.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn checked_index(index: i64) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i <= MAX_INDEX)
        .ok_or(Error::InvalidIndex { index })
}
