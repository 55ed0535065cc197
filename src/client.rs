//! API facade
//!
//! `Client` is the entry point: single-object calls (`user`, `destroy`,
//! `trends`) fetch immediately, while the collection calls return a
//! `PagedSequence` that fetches nothing until it is read.

use crate::auth::AuthConfig;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{FetchRequest, HttpTransport, HttpTransportConfig, Transport};
use crate::pagination::{PagedSequence, SearchPolicy, TimelinePolicy, UserListPolicy};
use crate::record::{Record, Status, TrendSet, User};
use crate::types::{RequestParams, SEARCH_API_DOMAIN};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Optional filters for `Client::search`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only results with an ID greater than this
    pub since_id: Option<u64>,
    /// ISO 639-1 language code
    pub lang: Option<String>,
    /// `latitude,longitude,radius` with radius in `mi` or `km`
    pub geocode: Option<String>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn since_id(mut self, since_id: u64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    #[must_use]
    pub fn geocode(mut self, geocode: impl Into<String>) -> Self {
        self.geocode = Some(geocode.into());
        self
    }
}

/// Window of a trends request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendPeriod {
    #[default]
    Current,
    Daily,
    Weekly,
}

impl TrendPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry point to the API
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    search_domain: String,
    /// Set when the transport was built here, so credentials can be swapped
    http_config: Option<HttpTransportConfig>,
}

impl Client {
    /// Anonymous client with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    /// Client with an HTTP transport built from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http_config = config.transport_config()?;
        let transport = HttpTransport::with_auth(http_config.clone(), config.auth_config())?;
        Ok(Self {
            transport: Arc::new(transport),
            search_domain: http_config.search_domain.clone(),
            http_config: Some(http_config),
        })
    }

    /// Client over any transport; search requests go to the public Search API
    /// domain unless overridden with `with_search_domain`.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            search_domain: SEARCH_API_DOMAIN.to_string(),
            http_config: None,
        }
    }

    #[must_use]
    pub fn with_search_domain(mut self, domain: impl Into<String>) -> Self {
        self.search_domain = domain.into();
        self
    }

    /// Send subsequent requests with HTTP Basic credentials.
    ///
    /// Only clients that own their HTTP transport can change credentials.
    pub fn authenticate(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<()> {
        let Some(ref config) = self.http_config else {
            return Err(Error::config(
                "credentials of an injected transport cannot be changed",
            ));
        };
        let transport =
            HttpTransport::with_auth(config.clone(), AuthConfig::basic(username, password))?;
        self.transport = Arc::new(transport);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.transport.is_authenticated()
    }

    pub fn search_domain(&self) -> &str {
        &self.search_domain
    }

    /// Extended profile of a user, by ID or screen name, with the latest
    /// status inline.
    pub async fn user(&self, user: &str) -> Result<User> {
        let path = format!("/users/show/{user}.json");
        let response = self.transport.fetch(FetchRequest::new(path)).await?;
        User::decode_value(&response)
    }

    /// Statuses matching `query`, newest first
    pub fn search(&self, query: &str, options: SearchOptions) -> PagedSequence<SearchPolicy> {
        let policy = SearchPolicy::new(query)
            .lang(options.lang)
            .geocode(options.geocode);

        PagedSequence::new(self.transport.clone(), "/search.json", policy)
            .with_domain(self.search_domain.clone())
            .with_since_id(options.since_id.unwrap_or(0))
    }

    /// Followers of `user`, or of the authenticated user when `None`
    pub fn followers(&self, user: Option<&str>) -> Result<PagedSequence<UserListPolicy>> {
        self.require_auth("followers")?;
        Ok(self.user_list("/statuses/followers.json", user))
    }

    /// Users `user` follows, or the authenticated user's friends when `None`
    pub fn friends(&self, user: Option<&str>) -> Result<PagedSequence<UserListPolicy>> {
        self.require_auth("friends")?;
        Ok(self.user_list("/statuses/friends.json", user))
    }

    /// Most recent statuses of `user`. Reading the authenticated user's own
    /// timeline (`user` set to `None`) requires credentials.
    pub fn user_timeline(
        &self,
        user: Option<&str>,
        since_id: Option<u64>,
    ) -> Result<PagedSequence<TimelinePolicy>> {
        if user.is_none() {
            self.require_auth("user_timeline without a user")?;
        }

        let policy = TimelinePolicy::new(user.map(str::to_string));
        Ok(
            PagedSequence::new(self.transport.clone(), "/statuses/user_timeline.json", policy)
                .with_since_id(since_id.unwrap_or(0)),
        )
    }

    /// Delete a status of the authenticated user and return it
    pub async fn destroy(&self, status_id: u64) -> Result<Status> {
        self.require_auth("destroy")?;

        let request = FetchRequest::new(format!("/statuses/destroy/{status_id}.json"))
            .body(RequestParams::new().with("delete", "1"));
        let response = self.transport.fetch(request).await?;
        Status::decode_value(&response)
    }

    /// Trending topics for `period`
    pub async fn trends(&self, period: TrendPeriod) -> Result<TrendSet> {
        let request = FetchRequest::new(format!("/trends/{period}.json"))
            .domain(Some(self.search_domain.clone()));
        let response = self.transport.fetch(request).await?;
        TrendSet::decode(&response)
    }

    fn user_list(&self, path: &str, user: Option<&str>) -> PagedSequence<UserListPolicy> {
        PagedSequence::new(
            self.transport.clone(),
            path,
            UserListPolicy::new(user.map(str::to_string)),
        )
    }

    fn require_auth(&self, operation: &str) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            debug!("Refusing {} without credentials", operation);
            Err(Error::not_authenticated(operation))
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("search_domain", &self.search_domain)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JsonValue;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport answering every request with the same body
    struct FixedTransport {
        body: JsonValue,
        authenticated: bool,
        calls: AtomicUsize,
    }

    impl FixedTransport {
        fn new(body: JsonValue, authenticated: bool) -> Arc<Self> {
            Arc::new(Self {
                body,
                authenticated,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn fetch(&self, _request: FetchRequest) -> Result<JsonValue> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }

        fn is_authenticated(&self) -> bool {
            self.authenticated
        }
    }

    #[test]
    fn test_trend_period_paths() {
        assert_eq!(TrendPeriod::default().to_string(), "current");
        assert_eq!(TrendPeriod::Daily.as_str(), "daily");
        assert_eq!(TrendPeriod::Weekly.as_str(), "weekly");
    }

    #[test]
    fn test_search_options_builder() {
        let options = SearchOptions::new().since_id(7).lang("es").geocode("1,2,3km");
        assert_eq!(options.since_id, Some(7));
        assert_eq!(options.lang.as_deref(), Some("es"));
        assert_eq!(options.geocode.as_deref(), Some("1,2,3km"));
    }

    #[test]
    fn test_new_client_is_anonymous() {
        let client = Client::new().unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.search_domain(), "search.twitter.com");
    }

    #[test]
    fn test_authenticate_rebuilds_transport() {
        let mut client = Client::new().unwrap();
        client.authenticate("testpy", "testpy").unwrap();
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_authenticate_injected_transport_fails() {
        let mut client = Client::with_transport(FixedTransport::new(json!([]), false));
        let err = client.authenticate("testpy", "testpy").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_auth_required_before_any_request() {
        let transport = FixedTransport::new(json!([]), false);
        let client = Client::with_transport(transport.clone());

        for err in [
            client.followers(None).unwrap_err(),
            client.friends(Some("reflejo")).unwrap_err(),
            client.user_timeline(None, None).unwrap_err(),
            client.destroy(1).await.unwrap_err(),
        ] {
            assert!(matches!(err, Error::NotAuthenticated { .. }));
        }
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_public_timeline_needs_no_auth() {
        let client = Client::with_transport(FixedTransport::new(json!([]), false));
        let seq = client.user_timeline(Some("reflejo"), Some(10)).unwrap();
        assert_eq!(seq.path(), "/statuses/user_timeline.json");
        assert_eq!(seq.cursor().since_id, 10);
    }

    #[test]
    fn test_search_uses_search_domain() {
        let client = Client::with_transport(FixedTransport::new(json!({}), false))
            .with_search_domain("search.local");
        let seq = client.search("rust", SearchOptions::new().lang("en"));

        assert_eq!(seq.domain(), Some("search.local"));
        assert_eq!(seq.policy().query, "rust");
        assert_eq!(seq.policy().lang.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_user_decodes_response() {
        let transport = FixedTransport::new(
            json!({"id": 17, "screen_name": "reflejo", "followers_count": "42"}),
            false,
        );
        let client = Client::with_transport(transport.clone());

        let user = client.user("reflejo").await.unwrap();
        assert_eq!(user.id, Some(17));
        assert_eq!(user.followers_count, Some(42));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_user_rejects_non_object() {
        let client = Client::with_transport(FixedTransport::new(json!([1, 2]), false));
        let err = client.user("reflejo").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
