// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # tweetkit
//!
//! An async client for the Twitter REST and Search APIs.
//!
//! ## Features
//!
//! - **Typed records**: users, statuses, search results and trends decoded
//!   from loosely typed JSON (numeric strings, HTML entities, several date
//!   layouts)
//! - **Lazy pagination**: collections are indexable, sliceable sequences that
//!   fetch 100-item pages only when read and cache them for their lifetime
//! - **Auth**: HTTP Basic, or OAuth 1.0a through a caller-supplied signer
//! - **Rate limiting**: optional client-side token bucket
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tweetkit::{Client, SearchOptions, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new()?;
//!
//!     let user = client.user("reflejo").await?;
//!     println!("{:?} has {:?} followers", user.screen_name, user.followers_count);
//!
//!     let mut results = client.search("rust", SearchOptions::new().lang("en"));
//!     let first_ten = results.get_range(0, Some(10)).await?;
//!
//!     let everything: Vec<_> = results.stream().try_collect().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │  user()  search()  followers()  friends()  user_timeline()  │
//! │  destroy()  trends()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────┬───────────────────────┐
//! │   Record     │     Pagination       │   HTTP / Auth         │
//! ├──────────────┼──────────────────────┼───────────────────────┤
//! │ User         │ PagedSequence        │ Transport             │
//! │ Status       │ UserListPolicy       │ Basic / OAuth 1.0a    │
//! │ SearchResult │ TimelinePolicy       │ Rate Limit            │
//! │ TrendSet     │ SearchPolicy         │                       │
//! └──────────────┴──────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP transport with rate limiting
pub mod http;

/// Record kinds and field coercions
pub mod record;

/// Lazily fetched sequences
pub mod pagination;

/// API facade
pub mod client;

/// Client configuration
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use client::{Client, SearchOptions, TrendPeriod};
pub use config::ClientConfig;
pub use http::{HttpTransport, Transport};
pub use pagination::PagedSequence;
pub use record::{Record, SearchResult, Status, Trend, TrendSet, User};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
