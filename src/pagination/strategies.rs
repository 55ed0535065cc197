//! Request policies for the paginated resources
//!
//! Each policy knows the parameters its endpoint expects, where the item list
//! lives in the response, and which metadata to carry between pages.

use super::types::{bare_list, CursorState, RequestPolicy};
use crate::error::{Error, Result};
use crate::record::coerce::{self, describe};
use crate::record::{Identified, SearchResult, Status, User};
use crate::types::{JsonValue, RequestParams, PAGE_SIZE};

// ============================================================================
// User lists
// ============================================================================

/// Followers or friends of a user; the authenticated user when `user` is `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListPolicy {
    pub user: Option<String>,
}

impl UserListPolicy {
    pub fn new(user: Option<String>) -> Self {
        Self { user }
    }
}

impl RequestPolicy for UserListPolicy {
    type Item = User;

    fn page_params(&self, page: usize, _state: &CursorState) -> RequestParams {
        RequestParams::new()
            .with("page", page)
            .with("user", self.user.as_deref())
    }

    fn items<'a>(&self, response: &'a JsonValue) -> Result<&'a [JsonValue]> {
        bare_list("user", response)
    }
}

// ============================================================================
// Timelines
// ============================================================================

/// Statuses posted by a user, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelinePolicy {
    pub user: Option<String>,
}

impl TimelinePolicy {
    pub fn new(user: Option<String>) -> Self {
        Self { user }
    }
}

impl RequestPolicy for TimelinePolicy {
    type Item = Status;

    fn page_params(&self, page: usize, state: &CursorState) -> RequestParams {
        RequestParams::new()
            .with("page", page)
            .with("count", PAGE_SIZE)
            .with("since_id", state.effective_since_id())
            .with("screen_name", self.user.as_deref())
            .with("max_id", state.max_id)
    }

    fn items<'a>(&self, response: &'a JsonValue) -> Result<&'a [JsonValue]> {
        bare_list("status", response)
    }

    fn absorb(&self, _response: &JsonValue, fresh: &[Status], state: &mut CursorState) -> Result<()> {
        if let Some(max) = fresh.iter().filter_map(Identified::record_id).max() {
            state.observe_max_id(max);
        }
        Ok(())
    }
}

// ============================================================================
// Search
// ============================================================================

/// Search API query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPolicy {
    pub query: String,
    /// ISO 639-1 language filter
    pub lang: Option<String>,
    /// `latitude,longitude,radius` filter
    pub geocode: Option<String>,
}

impl SearchPolicy {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn lang(mut self, lang: Option<String>) -> Self {
        self.lang = lang;
        self
    }

    #[must_use]
    pub fn geocode(mut self, geocode: Option<String>) -> Self {
        self.geocode = geocode;
        self
    }
}

impl RequestPolicy for SearchPolicy {
    type Item = SearchResult;

    fn page_params(&self, page: usize, state: &CursorState) -> RequestParams {
        RequestParams::new()
            .with("q", self.query.as_str())
            .with("page", page)
            .with("rpp", PAGE_SIZE)
            .with("since_id", state.effective_since_id())
            .with("lang", self.lang.as_deref())
            .with("max_id", state.max_id)
            .with("geocode", self.geocode.as_deref())
    }

    fn items<'a>(&self, response: &'a JsonValue) -> Result<&'a [JsonValue]> {
        match response.get("results") {
            Some(results) => bare_list("search_result", results),
            None => Err(Error::decode(format!(
                "search response has no results: {}",
                describe(response)
            ))),
        }
    }

    fn absorb(
        &self,
        response: &JsonValue,
        _fresh: &[SearchResult],
        state: &mut CursorState,
    ) -> Result<()> {
        let max_id = response
            .get("max_id")
            .filter(|v| !coerce::is_falsy(v))
            .map(coerce::id)
            .transpose()
            .map_err(|e| Error::decode(format!("search_result.max_id: {e}")))?;
        let elapsed = response.get("completed_in").and_then(seconds);

        if let Some(elapsed) = elapsed {
            state.completed_in = Some(elapsed);
        }
        if let Some(max_id) = max_id {
            state.observe_max_id(max_id);
        }
        Ok(())
    }
}

fn seconds(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
