//! reqwest-backed transport
//!
//! Sends each `FetchRequest` exactly once:
//! - Falsy parameters are dropped before the request is built
//! - GET with a query string, or POST with a form body when one is present
//! - Optional client-side rate limiting
//! - Error classification: non-success status vs `error` field in the body

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{FetchRequest, Transport};
use crate::auth::{AuthConfig, Authenticator, SigningRequest};
use crate::error::{Error, Result};
use crate::types::{JsonValue, API_DOMAIN, DEFAULT_TIMEOUT, SEARCH_API_DOMAIN};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// URL scheme, `https` unless talking to a local mock
    pub scheme: String,
    /// Domain used when a request carries no override
    pub api_domain: String,
    /// Domain of the Search API
    pub search_domain: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            api_domain: API_DOMAIN.to_string(),
            search_domain: SEARCH_API_DOMAIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("tweetkit/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: None,
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

/// Builder for HTTP transport config
#[derive(Debug, Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the URL scheme
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = scheme.into();
        self
    }

    /// Set the REST API domain
    pub fn api_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.api_domain = domain.into();
        self
    }

    /// Set the Search API domain
    pub fn search_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.search_domain = domain.into();
        self
    }

    /// Point both domains at one host (handy for mocks and proxies)
    pub fn domain(self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.api_domain(domain.clone()).search_domain(domain)
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// HTTP transport with authentication and rate limiting
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpTransport {
    /// Create a transport with default configuration and no credentials
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Create a transport with authentication
    pub fn with_auth(config: HttpTransportConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::new(auth),
            rate_limiter,
        })
    }

    /// Replace the credentials used for subsequent requests
    pub fn set_auth(&mut self, auth: AuthConfig) {
        self.authenticator = Authenticator::new(auth);
    }

    /// Transport configuration
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Build the absolute URL for `path` on `domain` (or the API domain)
    pub fn build_url(&self, domain: Option<&str>, path: &str) -> Result<Url> {
        let domain = domain.unwrap_or(&self.config.api_domain);
        let base = Url::parse(&format!("{}://{}", self.config.scheme, domain))?;
        Ok(base.join(path)?)
    }

    /// Send one request and decode its JSON body
    pub async fn send(&self, request: &FetchRequest) -> Result<JsonValue> {
        let url = self.build_url(request.domain.as_deref(), &request.path)?;
        let query = request.query.to_pairs();
        let body = request.body.to_pairs();
        let method = if body.is_empty() {
            Method::GET
        } else {
            Method::POST
        };

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            req = req.query(&query);
        }
        if !body.is_empty() {
            req = req.form(&body);
        }

        let signed_params: Vec<(String, String)> =
            query.iter().chain(body.iter()).cloned().collect();
        let signing = SigningRequest {
            method: &method,
            url: &url,
            params: &signed_params,
        };
        req = self.authenticator.apply(req, &signing)?;

        debug!(
            "{} {} ({} params, auth: {})",
            method,
            url,
            signed_params.len(),
            self.authenticator.scheme()
        );

        let response = req.send().await?;
        let status = response.status();

        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
        {
            debug!("Rate limit remaining: {}", remaining);
        }

        let text = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<JsonValue>(&text)
                .ok()
                .and_then(|v| remote_error(&v))
                .unwrap_or_else(|| abbreviate(&text));
            warn!("Request failed with {}: {} {}", status.as_u16(), method, url);
            return Err(Error::connection(
                format!("HTTP {}: {}", status.as_u16(), detail),
                Some(status.as_u16()),
            ));
        }

        let value: JsonValue = serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("Failed to parse JSON from {url}: {e}")))?;

        if let Some(message) = remote_error(&value) {
            return Err(Error::remote(message));
        }

        Ok(value)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<JsonValue> {
        self.send(&request).await
    }

    fn is_authenticated(&self) -> bool {
        self.authenticator.is_authenticated()
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .field("auth", &self.authenticator.scheme())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Message of the `error` field the API puts in failed responses
fn remote_error(value: &JsonValue) -> Option<String> {
    match value.get("error")? {
        JsonValue::Null => None,
        JsonValue::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// First line of a non-JSON error body, capped for log and error output
fn abbreviate(body: &str) -> String {
    let line = body.lines().next().unwrap_or("").trim();
    if line.chars().count() > 200 {
        let cut: String = line.chars().take(200).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
