// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The structured record of one captured exchange.

use crate::classify::Payload;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Header map with lowercase names, stable under serialization.
pub type RecordedHeaders = BTreeMap<String, String>;

/// One captured request/response exchange.
///
/// The field names are the serialization contract; `reqheaders` is spelled
/// exactly so in the serialized form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Base URL of the endpoint, `scheme://host:port`.
    pub scope: String,
    /// Uppercase HTTP method.
    pub method: String,
    /// Request path, including any query string.
    pub path: String,
    /// Classified request body.
    #[serde(default)]
    pub body: Value,
    /// Response status code.
    pub status: u16,
    /// Classified response body.
    #[serde(default)]
    pub response: Value,
    /// Response headers.
    #[serde(default)]
    pub headers: RecordedHeaders,
    /// Request headers.
    #[serde(default)]
    pub reqheaders: RecordedHeaders,
}

impl ExchangeRecord {
    /// Build a record from raw captured parts, classifying both bodies.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        scope: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        request_body: &[u8],
        status: u16,
        response_body: &[u8],
        headers: RecordedHeaders,
        reqheaders: RecordedHeaders,
    ) -> Self {
        Self {
            scope: scope.into(),
            method: method.into().to_ascii_uppercase(),
            path: path.into(),
            body: Payload::classify(request_body).to_value(),
            status,
            response: Payload::classify(response_body).to_value(),
            headers,
            reqheaders,
        }
    }

    /// The classified request body.
    pub fn body_payload(&self) -> Payload {
        Payload::from_value(&self.body)
    }

    /// The classified response body.
    pub fn response_payload(&self) -> Payload {
        Payload::from_value(&self.response)
    }
}

#[cfg(test)]
#[path = "exchange_tests.rs"]
mod tests;
