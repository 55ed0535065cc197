//! Error types for tweetkit
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for tweetkit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// The request never produced a usable response (network failure or a
    /// non-success HTTP status).
    #[error("Network error ({message})")]
    Connection {
        message: String,
        status: Option<u16>,
    },

    /// The API answered with a well-formed body carrying an `error` field.
    #[error("Remote error: {message}")]
    Remote { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Sequence Errors
    // ============================================================================
    #[error("Index {index} is out of range (negative or past the supported maximum)")]
    InvalidIndex { index: i64 },

    #[error("Length of a paginated sequence is unknown")]
    UnknownLength,

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication required for {operation}")]
    NotAuthenticated { operation: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a connection error
    pub fn connection(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Connection {
            message: message.into(),
            status,
        }
    }

    /// Create a remote (API-reported) error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a not-authenticated error for the named operation
    pub fn not_authenticated(operation: impl Into<String>) -> Self {
        Self::NotAuthenticated {
            operation: operation.into(),
        }
    }

    /// HTTP status code attached to a connection error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Connection { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this error means the server could not be reached or refused the request
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// Check if this error was reported by the API itself
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        Error::Connection {
            message: err.to_string(),
            status,
        }
    }
}

/// Result type alias for tweetkit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::connection("HTTP 404: Not found", Some(404));
        assert_eq!(err.to_string(), "Network error (HTTP 404: Not found)");

        let err = Error::remote("Rate limit exceeded");
        assert_eq!(err.to_string(), "Remote error: Rate limit exceeded");

        let err = Error::InvalidIndex { index: -1 };
        assert_eq!(
            err.to_string(),
            "Index -1 is out of range (negative or past the supported maximum)"
        );

        let err = Error::not_authenticated("followers");
        assert_eq!(err.to_string(), "Authentication required for followers");
    }

    #[test]
    fn test_error_classification() {
        let err = Error::connection("timed out", None);
        assert!(err.is_connection());
        assert!(!err.is_remote());
        assert_eq!(err.status_code(), None);

        let err = Error::connection("HTTP 502", Some(502));
        assert_eq!(err.status_code(), Some(502));

        let err = Error::remote("Not found");
        assert!(err.is_remote());
        assert!(!err.is_connection());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
