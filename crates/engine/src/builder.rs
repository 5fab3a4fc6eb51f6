// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent registration API.
//!
//! ```ignore
//! mock("http://api.test")?
//!     .get("/items")
//!     .reply(200, json!({"items": []}))
//!     .register(&engine);
//! ```

use crate::endpoint::{Endpoint, EndpointError};
use crate::engine::Engine;
use crate::expectation::{Expectation, Reply, ReplyBody, ScopeFilter};
use crate::matcher::{BodyMatcher, ValueMatcher};
use crate::registry::Registered;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Start a builder for the given base URL (`scheme://host[:port]`).
pub fn mock(base_url: &str) -> Result<ExpectationBuilder, EndpointError> {
    let (endpoint, _) = Endpoint::parse_url(base_url)?;
    Ok(ExpectationBuilder::new(endpoint))
}

/// Builder for one expectation.
///
/// Methods starting with `match_` constrain the request; `reply*` methods
/// declare the simulated response.
pub struct ExpectationBuilder {
    endpoint: Endpoint,
    method: String,
    path: ValueMatcher,
    headers: BTreeMap<String, ValueMatcher>,
    body: Option<BodyMatcher>,
    reply: Reply,
    times: u32,
    persistent: bool,
    scope_filter: Option<ScopeFilter>,
    allow_unmocked: bool,
}

impl std::fmt::Debug for ExpectationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpectationBuilder")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("reply", &self.reply)
            .field("times", &self.times)
            .field("persistent", &self.persistent)
            .field("scope_filter", &self.scope_filter.as_ref().map(|_| "<fn>"))
            .field("allow_unmocked", &self.allow_unmocked)
            .finish()
    }
}

impl ExpectationBuilder {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            method: "GET".to_string(),
            path: ValueMatcher::Exact("/".to_string()),
            headers: BTreeMap::new(),
            body: None,
            reply: Reply::new(200, ReplyBody::Text(String::new())),
            times: 1,
            persistent: false,
            scope_filter: None,
            allow_unmocked: false,
        }
    }

    /// Set the method and path matcher.
    pub fn method(mut self, method: &str, path: impl Into<ValueMatcher>) -> Self {
        self.method = method.to_ascii_uppercase();
        self.path = path.into();
        self
    }

    pub fn get(self, path: impl Into<ValueMatcher>) -> Self {
        self.method("GET", path)
    }

    pub fn post(self, path: impl Into<ValueMatcher>) -> Self {
        self.method("POST", path)
    }

    pub fn put(self, path: impl Into<ValueMatcher>) -> Self {
        self.method("PUT", path)
    }

    pub fn delete(self, path: impl Into<ValueMatcher>) -> Self {
        self.method("DELETE", path)
    }

    pub fn head(self, path: impl Into<ValueMatcher>) -> Self {
        self.method("HEAD", path)
    }

    /// Require a request header to match.
    pub fn match_header(mut self, name: &str, matcher: impl Into<ValueMatcher>) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), matcher.into());
        self
    }

    /// Require the request body to match.
    pub fn match_body(mut self, matcher: impl Into<BodyMatcher>) -> Self {
        self.body = Some(matcher.into());
        self
    }

    /// Declare the reply status and body.
    pub fn reply(mut self, status: u16, body: impl Into<ReplyBody>) -> Self {
        let headers = std::mem::take(&mut self.reply.headers);
        let delay = self.reply.delay;
        self.reply = Reply::new(status, body);
        self.reply.headers = headers;
        self.reply.delay = delay;
        self
    }

    /// Replace the whole reply.
    pub fn reply_with(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    /// Fail the exchange with a simulated transport error.
    pub fn reply_error(mut self, message: impl Into<String>) -> Self {
        let delay = self.reply.delay;
        self.reply = Reply::error(message);
        self.reply.delay = delay;
        self
    }

    /// Attach a response header.
    pub fn reply_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.reply
            .headers
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Delay emission of the reply.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.reply.delay = Some(delay);
        self
    }

    /// Allow this expectation to be used `n` times (clamped to at least 1).
    pub fn times(mut self, n: u32) -> Self {
        self.times = n.max(1);
        self
    }

    /// Never remove this expectation regardless of use count.
    pub fn persist(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// When method/path/headers match but the body does not, let the real
    /// request proceed instead of failing.
    pub fn allow_unmocked(mut self) -> Self {
        self.allow_unmocked = true;
        self
    }

    /// Override lookup with a predicate over a base-URL string.
    pub fn filter_scope(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.scope_filter = Some(Arc::new(f));
        self
    }

    /// Finish into a plain expectation.
    pub fn build(self) -> Expectation {
        let mut expectation =
            Expectation::new(self.endpoint, &self.method, self.path, self.reply);
        expectation.headers = self.headers;
        expectation.body = self.body;
        expectation.times = self.times;
        expectation.persistent = self.persistent;
        expectation.scope_filter = self.scope_filter;
        expectation.allow_unmocked = self.allow_unmocked;
        expectation
    }

    /// Build and register on an engine.
    pub fn register(self, engine: &Engine) -> Arc<Registered> {
        engine.register(self.build())
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
