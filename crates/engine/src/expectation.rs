// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expectation and reply model.

use crate::endpoint::Endpoint;
use crate::matcher::{BodyMatcher, ValueMatcher};
use crate::transport::{Headers, RequestHead};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Predicate over a base-URL string, used as a lookup override.
pub type ScopeFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Function producing a reply body from the matched request.
pub type ReplyFn = Arc<dyn Fn(&RequestHead, &[u8]) -> Vec<u8> + Send + Sync>;

/// Declared body of a simulated reply.
#[derive(Clone)]
pub enum ReplyBody {
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
    /// Each element is emitted as its own response chunk.
    Chunks(Vec<Vec<u8>>),
    /// Computed from the matched request head and buffered body.
    FromRequest(ReplyFn),
    /// Fail the exchange with a simulated transport error instead of
    /// emitting a response.
    Fail(String),
}

impl ReplyBody {
    pub fn from_request(f: impl Fn(&RequestHead, &[u8]) -> Vec<u8> + Send + Sync + 'static) -> Self {
        ReplyBody::FromRequest(Arc::new(f))
    }
}

impl fmt::Debug for ReplyBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyBody::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ReplyBody::Json(v) => f.debug_tuple("Json").field(v).finish(),
            ReplyBody::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            ReplyBody::Chunks(c) => f.debug_tuple("Chunks").field(&c.len()).finish(),
            ReplyBody::FromRequest(_) => f.debug_struct("FromRequest").finish_non_exhaustive(),
            ReplyBody::Fail(msg) => f.debug_tuple("Fail").field(msg).finish(),
        }
    }
}

impl From<&str> for ReplyBody {
    fn from(s: &str) -> Self {
        ReplyBody::Text(s.to_string())
    }
}

impl From<String> for ReplyBody {
    fn from(s: String) -> Self {
        ReplyBody::Text(s)
    }
}

impl From<Value> for ReplyBody {
    fn from(v: Value) -> Self {
        ReplyBody::Json(v)
    }
}

impl From<Vec<u8>> for ReplyBody {
    fn from(b: Vec<u8>) -> Self {
        ReplyBody::Bytes(b)
    }
}

/// Declared reply for a matched request.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub headers: Headers,
    pub body: ReplyBody,
    /// Artificial delay honored before emission.
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<ReplyBody>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
            delay: None,
        }
    }

    /// A reply that fails the exchange with a simulated transport error.
    /// The status code is never emitted.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            headers: Headers::new(),
            body: ReplyBody::Fail(message.into()),
            delay: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One registered mock rule.
///
/// Created by registration (see [`crate::builder`]), consumed per
/// successful simulated exchange unless `persistent`, removed from the
/// registry when the use counter reaches zero.
#[derive(Clone)]
pub struct Expectation {
    /// Endpoint this expectation is filed under.
    pub endpoint: Endpoint,
    /// Uppercase HTTP method.
    pub method: String,
    /// Matched against the request path, query string included.
    pub path: ValueMatcher,
    /// Declared headers must all be present and match; others are ignored.
    pub headers: BTreeMap<String, ValueMatcher>,
    /// Optional body predicate, checked against the fully buffered body.
    pub body: Option<BodyMatcher>,
    pub reply: Reply,
    /// Allowed uses at registration time, at least 1.
    pub times: u32,
    /// Exempt from consumption-based removal.
    pub persistent: bool,
    /// Lookup-override predicate over a base-URL string.
    pub scope_filter: Option<ScopeFilter>,
    /// When method/path/headers matched but no body did, let the real
    /// request proceed instead of failing.
    pub allow_unmocked: bool,
}

impl Expectation {
    pub fn new(
        endpoint: Endpoint,
        method: &str,
        path: impl Into<ValueMatcher>,
        reply: Reply,
    ) -> Self {
        Self {
            endpoint,
            method: method.to_ascii_uppercase(),
            path: path.into(),
            headers: BTreeMap::new(),
            body: None,
            reply,
            times: 1,
            persistent: false,
            scope_filter: None,
            allow_unmocked: false,
        }
    }

    /// Short description for pending listings: `METHOD key<path>`.
    pub fn describe(&self) -> String {
        format!(
            "{} {}{}",
            self.method,
            self.endpoint.key(),
            self.path.describe()
        )
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("times", &self.times)
            .field("persistent", &self.persistent)
            .field("has_scope_filter", &self.scope_filter.is_some())
            .field("allow_unmocked", &self.allow_unmocked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "expectation_tests.rs"]
mod tests;
