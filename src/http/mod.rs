//! HTTP transport module
//!
//! Provides the `Transport` seam the paginated sequences fetch through, and
//! its reqwest-backed implementation.
//!
//! # Features
//!
//! - **Single attempt**: every fetch is one request; failures surface as-is
//! - **Rate Limiting**: optional client-side token bucket using governor
//! - **Authentication**: Basic or OAuth 1.0a via the auth module
//! - **Error classification**: network/HTTP failures vs API-reported errors

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{FetchRequest, Transport};
