// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport Hook contract.
//!
//! The platform-specific adapter that redirects real client calls into the
//! engine speaks this interface: it builds a [`RequestHead`] when a request
//! starts, streams body chunks into the exchange the engine hands back, and
//! implements [`ResponseSink`] so the engine can emit a simulated response.
//! How redirection physically happens is outside the engine.

use crate::endpoint::Endpoint;
use std::collections::BTreeMap;

/// Header map with lowercase names.
pub type Headers = BTreeMap<String, String>;

/// Normalize header names to lowercase.
pub fn normalize_headers<I, K, V>(pairs: I) -> Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
        .collect()
}

/// Normalized request line and headers, available before any body bytes.
#[derive(Clone, Debug)]
pub struct RequestHead {
    pub endpoint: Endpoint,
    /// Uppercase HTTP method.
    pub method: String,
    /// Path including any query string.
    pub path: String,
    pub headers: Headers,
}

impl RequestHead {
    pub fn new(endpoint: Endpoint, method: &str, path: impl Into<String>) -> Self {
        Self {
            endpoint,
            method: method.to_ascii_uppercase(),
            path: path.into(),
            headers: Headers::new(),
        }
    }

    /// Attach one request header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

/// Sink the engine drives to emit a simulated response.
///
/// Calls arrive strictly in order: headers once, zero or more chunks, end
/// once.
pub trait ResponseSink {
    fn emit_response_headers(&mut self, status: u16, headers: &Headers);
    fn emit_response_chunk(&mut self, chunk: &[u8]);
    fn emit_response_end(&mut self);
}

/// Why an exchange was handed back to the real network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardReason {
    /// The kill-switch disabled interception entirely.
    Disabled,
    /// A recording session is observing live traffic.
    Recording,
    /// No expectation applied and the net-connect policy allows the host.
    PolicyAllowed,
    /// A body-independent match carried the unmocked-fallback flag.
    UnmockedAllowed,
}

/// Final decision for one exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A simulated response was emitted into the sink.
    Replied,
    /// The adapter must forward the request to the real network.
    Forward(ForwardReason),
}

/// In-memory [`ResponseSink`] capturing everything emitted; handy for
/// adapter tests and used throughout this crate's own test suite.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub status: Option<u16>,
    pub headers: Headers,
    pub chunks: Vec<Vec<u8>>,
    pub ended: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All emitted chunks concatenated.
    pub fn body(&self) -> Vec<u8> {
        self.chunks.concat()
    }
}

impl ResponseSink for MemorySink {
    fn emit_response_headers(&mut self, status: u16, headers: &Headers) {
        self.status = Some(status);
        self.headers = headers.clone();
    }

    fn emit_response_chunk(&mut self, chunk: &[u8]) {
        self.chunks.push(chunk.to_vec());
    }

    fn emit_response_end(&mut self) {
        self.ended = true;
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
