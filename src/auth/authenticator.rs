//! Authenticator implementation
//!
//! Applies the configured credentials to request builders.

use super::types::{AuthConfig, SigningRequest};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Clone, Default)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Precomputed `Authorization` value for Basic auth
    basic_header: Option<String>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        let basic_header = match &config {
            AuthConfig::Basic { username, password } => Some(format!(
                "Basic {}",
                STANDARD.encode(format!("{username}:{password}"))
            )),
            _ => None,
        };

        Self {
            config,
            basic_header,
        }
    }

    /// Check if any credentials are configured
    pub fn is_authenticated(&self) -> bool {
        !self.config.is_none()
    }

    /// Name of the configured scheme, for logging
    pub fn scheme(&self) -> &'static str {
        match self.config {
            AuthConfig::None => "none",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::OAuth1(_) => "oauth1",
        }
    }

    /// The Basic `Authorization` header value, if Basic auth is configured
    pub fn basic_header(&self) -> Option<&str> {
        self.basic_header.as_deref()
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder, signing: &SigningRequest<'_>) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Basic { .. } => match &self.basic_header {
                Some(header) => Ok(req.header(AUTHORIZATION, header.as_str())),
                None => Err(Error::auth("Basic credentials were not prepared")),
            },

            AuthConfig::OAuth1(signer) => {
                let header = signer
                    .authorization(signing)
                    .map_err(|e| Error::auth(format!("OAuth signing failed: {e}")))?;
                Ok(req.header(AUTHORIZATION, header))
            }
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
