// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[test]
fn test_https_defaults_to_443() {
    let endpoint = Endpoint::new(Scheme::Https, "example.com", None);
    assert_eq!(endpoint.port, 443);
    assert_eq!(endpoint.host_with_port(), "example.com:443");
    assert_eq!(endpoint.key(), "https://example.com:443");
}

#[test]
fn test_embedded_port_is_preserved() {
    let endpoint = Endpoint::new(Scheme::Http, "example.com:8080", None);
    assert_eq!(endpoint.host, "example.com");
    assert_eq!(endpoint.port, 8080);
}

#[test]
fn test_embedded_port_wins_over_argument() {
    let endpoint = Endpoint::new(Scheme::Http, "example.com:8080", Some(9090));
    assert_eq!(endpoint.port, 8080);
}

#[test]
fn test_empty_host_defaults_to_localhost() {
    let endpoint = Endpoint::new(Scheme::Http, "", None);
    assert_eq!(endpoint.host, "localhost");
    assert_eq!(endpoint.port, 80);
}

#[test]
fn test_host_is_lowercased() {
    let endpoint = Endpoint::new(Scheme::Http, "API.Example.COM", None);
    assert_eq!(endpoint.host, "api.example.com");
}

#[test]
fn test_implicit_and_explicit_default_port_share_a_key() {
    let implicit = Endpoint::new(Scheme::Http, "example.com", None);
    let explicit = Endpoint::new(Scheme::Http, "example.com:80", None);
    assert_eq!(implicit.key(), explicit.key());
}

#[parameterized(
    http_root = { "http://api.test", "http", "api.test", 80, "/" },
    https_path = { "https://api.test/items", "https", "api.test", 443, "/items" },
    with_port = { "http://api.test:8080/v1/items?page=2", "http", "api.test", 8080, "/v1/items?page=2" },
)]
fn test_parse_url(url: &str, scheme: &str, host: &str, port: u16, path: &str) {
    let (endpoint, parsed_path) = Endpoint::parse_url(url).unwrap();
    assert_eq!(endpoint.scheme.as_str(), scheme);
    assert_eq!(endpoint.host, host);
    assert_eq!(endpoint.port, port);
    assert_eq!(parsed_path, path);
}

#[test]
fn test_parse_url_rejects_unknown_scheme() {
    assert!(Endpoint::parse_url("ftp://example.com").is_err());
    assert!(Endpoint::parse_url("example.com").is_err());
}

proptest! {
    #[test]
    fn prop_normalization_is_idempotent(
        host in "[a-z][a-z0-9.-]{0,30}",
        port in proptest::option::of(1u16..),
        https in any::<bool>(),
    ) {
        let scheme = if https { Scheme::Https } else { Scheme::Http };
        let once = Endpoint::new(scheme, &host, port);
        let twice = Endpoint::new(once.scheme, once.host_with_port(), None);
        prop_assert_eq!(once, twice);
    }
}
