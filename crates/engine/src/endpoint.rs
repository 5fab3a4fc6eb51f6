// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Endpoint normalization and canonical addressing keys.

use std::fmt;
use thiserror::Error;

/// Errors from parsing endpoint addresses.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("unsupported or missing scheme in '{0}'")]
    InvalidScheme(String),
}

/// URL scheme of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Default port for the scheme: 80 for http, 443 for https.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            _ => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized network endpoint: scheme, bare lowercase hostname, and an
/// always-resolved port.
///
/// Two requests with equivalent effective scheme/host/port normalize to the
/// same canonical key whether or not the port was written explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Normalize raw address fields.
    ///
    /// `host` may embed a port (`"example.com:8080"`), which an explicit
    /// `port` argument does not override. An empty host defaults to
    /// `localhost`; an absent port defaults per scheme. Idempotent:
    /// normalizing an already-normalized endpoint yields the same value.
    pub fn new(scheme: Scheme, host: impl AsRef<str>, port: Option<u16>) -> Self {
        let (hostname, embedded) = split_host_port(host.as_ref());
        let host = if hostname.is_empty() {
            "localhost".to_string()
        } else {
            hostname.to_ascii_lowercase()
        };
        let port = embedded.or(port).unwrap_or_else(|| scheme.default_port());
        Self { scheme, host, port }
    }

    /// Canonical registry key, `scheme://host:port`.
    pub fn key(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Composed `host:port` form.
    pub fn host_with_port(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL handed to scope filters and recorded as a record's scope.
    pub fn base_url(&self) -> String {
        self.key()
    }

    /// Parse a full URL into its endpoint and the remaining path (query
    /// string included). A missing path becomes `/`.
    pub fn parse_url(url: &str) -> Result<(Endpoint, String), EndpointError> {
        let (scheme_str, rest) = url
            .split_once("://")
            .ok_or_else(|| EndpointError::InvalidScheme(url.to_string()))?;
        let scheme = Scheme::parse(scheme_str)
            .ok_or_else(|| EndpointError::InvalidScheme(url.to_string()))?;
        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], rest[idx..].to_string()),
            None => (rest, "/".to_string()),
        };
        Ok((Endpoint::new(scheme, authority, None), path))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Split a trailing `:port` off a host string when present and numeric.
fn split_host_port(host: &str) -> (&str, Option<u16>) {
    match host.rsplit_once(':') {
        Some((name, port)) => match port.parse::<u16>() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        None => (host, None),
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
