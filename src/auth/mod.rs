//! Authentication module
//!
//! Supports: HTTP Basic, OAuth 1.0a (through a caller-supplied signer)
//!
//! The `Authenticator` decorates outgoing requests with the `Authorization`
//! header for the configured scheme.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, RequestSigner, SigningRequest};

#[cfg(test)]
mod tests;
