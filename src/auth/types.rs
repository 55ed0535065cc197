//! Auth configuration types

use crate::error::Result;
use reqwest::Method;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// The parts of a request an OAuth 1.0a signature covers
#[derive(Debug, Clone, Copy)]
pub struct SigningRequest<'a> {
    /// HTTP method
    pub method: &'a Method,
    /// Request URL without the query string
    pub url: &'a Url,
    /// Query and body parameters that will be sent
    pub params: &'a [(String, String)],
}

/// Produces the `Authorization` header value for an OAuth-signed request.
///
/// Signature computation (nonce, timestamp, HMAC) lives with the caller's
/// OAuth library; this crate only asks for the finished header.
pub trait RequestSigner: Send + Sync {
    /// Build the `Authorization` header value for `request`
    fn authorization(&self, request: &SigningRequest<'_>) -> Result<String>;
}

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// OAuth 1.0a with an external signer
    OAuth1(Arc<dyn RequestSigner>),
}

impl AuthConfig {
    /// Create a Basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create an OAuth 1.0a config
    pub fn oauth1(signer: impl RequestSigner + 'static) -> Self {
        Self::OAuth1(Arc::new(signer))
    }

    /// Check if no credentials are configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::OAuth1(_) => f.debug_tuple("OAuth1").field(&"<signer>").finish(),
        }
    }
}
