//! Tests for the auth module

use super::*;
use crate::error::{Error, Result};
use base64::Engine;
use reqwest::Method;
use url::Url;

struct StaticSigner;

impl RequestSigner for StaticSigner {
    fn authorization(&self, request: &SigningRequest<'_>) -> Result<String> {
        Ok(format!(
            "OAuth method=\"{}\", path=\"{}\", params=\"{}\"",
            request.method,
            request.url.path(),
            request.params.len()
        ))
    }
}

struct FailingSigner;

impl RequestSigner for FailingSigner {
    fn authorization(&self, _request: &SigningRequest<'_>) -> Result<String> {
        Err(Error::Other("no token".to_string()))
    }
}

fn signing_parts() -> (Method, Url, Vec<(String, String)>) {
    (
        Method::GET,
        Url::parse("https://twitter.com/statuses/friends.json").unwrap(),
        vec![("page".to_string(), "2".to_string())],
    )
}

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let (method, url, params) = signing_parts();
    let signing = SigningRequest {
        method: &method,
        url: &url,
        params: &params,
    };

    let client = reqwest::Client::new();
    let req = auth.apply(client.get(url.clone()), &signing).unwrap();
    let built = req.build().unwrap();

    assert!(!auth.is_authenticated());
    assert_eq!(auth.scheme(), "none");
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::basic("testpy", "secret"));
    let (method, url, params) = signing_parts();
    let signing = SigningRequest {
        method: &method,
        url: &url,
        params: &params,
    };

    let client = reqwest::Client::new();
    let built = auth
        .apply(client.get(url.clone()), &signing)
        .unwrap()
        .build()
        .unwrap();

    let expected = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode("testpy:secret")
    );
    assert!(auth.is_authenticated());
    assert_eq!(auth.scheme(), "basic");
    assert_eq!(auth.basic_header(), Some(expected.as_str()));
    assert_eq!(built.headers().get("Authorization").unwrap(), &expected);
}

#[test]
fn test_oauth1_signer_header() {
    let auth = Authenticator::new(AuthConfig::oauth1(StaticSigner));
    let (method, url, params) = signing_parts();
    let signing = SigningRequest {
        method: &method,
        url: &url,
        params: &params,
    };

    let client = reqwest::Client::new();
    let built = auth
        .apply(client.get(url.clone()), &signing)
        .unwrap()
        .build()
        .unwrap();

    assert!(auth.is_authenticated());
    assert_eq!(auth.scheme(), "oauth1");
    assert_eq!(auth.basic_header(), None);
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "OAuth method=\"GET\", path=\"/statuses/friends.json\", params=\"1\""
    );
}

#[test]
fn test_oauth1_signer_failure() {
    let auth = Authenticator::new(AuthConfig::oauth1(FailingSigner));
    let (method, url, params) = signing_parts();
    let signing = SigningRequest {
        method: &method,
        url: &url,
        params: &params,
    };

    let client = reqwest::Client::new();
    let err = auth.apply(client.get(url.clone()), &signing).unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
    assert!(err.to_string().contains("no token"));
}

#[test]
fn test_debug_redacts_secrets() {
    let auth = Authenticator::new(AuthConfig::basic("testpy", "hunter2"));
    let rendered = format!("{auth:?}");

    assert!(rendered.contains("testpy"));
    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains("Basic dGVzdHB5"));
}

#[test]
fn test_auth_config_default() {
    assert!(AuthConfig::default().is_none());
    assert!(!AuthConfig::basic("a", "b").is_none());
}
