//! Client configuration
//!
//! `ClientConfig` is the YAML-loadable description of how to reach the API:
//! scheme and domains, timeout, user agent, client-side rate limit and
//! credentials. Every field has a default, so an empty document is valid.
//!
//! ```yaml
//! timeout_secs: 5
//! rate_limit:
//!   requests_per_hour: 150
//! auth:
//!   type: basic
//!   username: reflejo
//!   password: secret
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpTransportConfig, RateLimiterConfig};
use crate::types::{API_DOMAIN, DEFAULT_TIMEOUT, SEARCH_API_DOMAIN};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL scheme
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Domain of the REST API
    #[serde(default = "default_api_domain")]
    pub api_domain: String,

    /// Domain of the Search API
    #[serde(default = "default_search_domain")]
    pub search_domain: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent; the crate name and version when unset
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side rate limit; none when unset
    #[serde(default)]
    pub rate_limit: Option<RateLimitDef>,

    /// Credentials
    #[serde(default)]
    pub auth: AuthDef,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_api_domain() -> String {
    API_DOMAIN.to_string()
}

fn default_search_domain() -> String {
    SEARCH_API_DOMAIN.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            api_domain: default_api_domain(),
            search_domain: default_search_domain(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            rate_limit: None,
            auth: AuthDef::default(),
        }
    }
}

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Transport settings described by this config
    pub fn transport_config(&self) -> Result<HttpTransportConfig> {
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        let mut builder = HttpTransportConfig::builder()
            .scheme(self.scheme.as_str())
            .api_domain(self.api_domain.as_str())
            .search_domain(self.search_domain.as_str())
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        if let Some(ref rate_limit) = self.rate_limit {
            builder = builder.rate_limit(rate_limit.to_limiter_config()?);
        }

        Ok(builder.build())
    }

    /// Credentials described by this config
    pub fn auth_config(&self) -> AuthConfig {
        match &self.auth {
            AuthDef::None => AuthConfig::None,
            AuthDef::Basic { username, password } => {
                AuthConfig::basic(username.as_str(), password.as_str())
            }
        }
    }
}

// ============================================================================
// Rate Limit
// ============================================================================

/// Client-side request budget; exactly one rate must be set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateLimitDef {
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    #[serde(default)]
    pub requests_per_hour: Option<u32>,

    /// Defaults to the rate
    #[serde(default)]
    pub burst_size: Option<u32>,
}

impl RateLimitDef {
    /// Convert into the limiter's config
    pub fn to_limiter_config(&self) -> Result<RateLimiterConfig> {
        let config = match (self.requests_per_second, self.requests_per_hour) {
            (Some(rps), None) => RateLimiterConfig::per_second(rps),
            (None, Some(rph)) => RateLimiterConfig::per_hour(rph),
            (Some(_), Some(_)) => {
                return Err(Error::config(
                    "rate_limit: set requests_per_second or requests_per_hour, not both",
                ))
            }
            (None, None) => {
                return Err(Error::config(
                    "rate_limit: requests_per_second or requests_per_hour is required",
                ))
            }
        };

        if config.max_requests == 0 {
            return Err(Error::config("rate_limit: rate must be greater than zero"));
        }

        Ok(match self.burst_size {
            Some(burst) => config.with_burst(burst),
            None => config,
        })
    }
}

// ============================================================================
// Auth Definition (in YAML)
// ============================================================================

/// Credentials from YAML
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDef {
    /// Anonymous access
    #[default]
    None,

    /// HTTP Basic authentication
    Basic { username: String, password: String },
}

impl std::fmt::Debug for AuthDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
