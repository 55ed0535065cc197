//! Transport trait and request description

use crate::error::Result;
use crate::types::{JsonValue, RequestParams};
use async_trait::async_trait;

/// One API call: a resource path, an optional domain override, and the
/// query and body parameters.
///
/// A request whose body has nothing to send goes out as GET, otherwise POST.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Resource path, e.g. `/statuses/friends.json`
    pub path: String,
    /// Domain to send to; the transport's API domain when `None`
    pub domain: Option<String>,
    /// Query string parameters
    pub query: RequestParams,
    /// Form body parameters
    pub body: RequestParams,
}

impl FetchRequest {
    /// Create a request for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the domain override
    #[must_use]
    pub fn domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    /// Set query parameters
    #[must_use]
    pub fn query(mut self, params: RequestParams) -> Self {
        self.query = params;
        self
    }

    /// Set body parameters
    #[must_use]
    pub fn body(mut self, params: RequestParams) -> Self {
        self.body = params;
        self
    }

    /// True when the request carries a body and must be sent as POST
    pub fn is_post(&self) -> bool {
        !self.body.is_blank()
    }
}

/// Performs one authenticated request and returns the decoded JSON body.
///
/// Implementations fail with `Error::Connection` when the server cannot be
/// reached or answers with a non-success status, and with `Error::Remote`
/// when the body carries an `error` field.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request`
    async fn fetch(&self, request: FetchRequest) -> Result<JsonValue>;

    /// Whether requests are sent with credentials
    fn is_authenticated(&self) -> bool {
        false
    }
}
