// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expectation definition files.
//!
//! Recorded exchanges persist as TOML or JSON and load back into
//! registrable expectations that reproduce the captured status, body, and
//! headers.

use crate::endpoint::{Endpoint, EndpointError};
use crate::expectation::{Expectation, Reply, ReplyBody};
use crate::matcher::{BodyMatcher, ValueMatcher};
use netless_record::{ExchangeRecord, Payload};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or converting definition files.
#[derive(Debug, Error)]
pub enum DefsError {
    #[error("failed to read definition file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record scope: {0}")]
    Scope(#[from] EndpointError),
}

/// TOML file shape: records listed under a `defs` array-of-tables.
#[derive(Deserialize)]
struct DefsFile {
    #[serde(default)]
    defs: Vec<ExchangeRecord>,
}

/// Load records from a definition file.
///
/// `.json` files hold a bare array of records; anything else is parsed as
/// TOML with records under `[[defs]]`.
pub fn load(path: &Path) -> Result<Vec<ExchangeRecord>, DefsError> {
    let content = std::fs::read_to_string(path)?;
    if path.extension().is_some_and(|e| e == "json") {
        Ok(serde_json::from_str(&content)?)
    } else {
        let file: DefsFile = toml::from_str(&content)?;
        Ok(file.defs)
    }
}

/// Write records to a JSON definition file.
pub fn save(path: &Path, records: &[ExchangeRecord]) -> Result<(), DefsError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Convert one record into an expectation reproducing it.
///
/// The recorded request body becomes the body matcher; the recorded
/// response becomes the reply, with hex-encoded binary payloads decoded
/// back to their original bytes.
pub fn to_expectation(record: &ExchangeRecord) -> Result<Expectation, DefsError> {
    let (endpoint, _) = Endpoint::parse_url(&record.scope)?;

    let body = match record.body_payload() {
        Payload::Empty => None,
        Payload::Json(value) => Some(BodyMatcher::Json(value)),
        Payload::Text(text) => Some(BodyMatcher::Text(text)),
        Payload::Binary(bytes) => Some(BodyMatcher::Bytes(bytes)),
    };

    let reply_body = match record.response_payload() {
        Payload::Empty => ReplyBody::Text(String::new()),
        Payload::Json(value) => ReplyBody::Json(value),
        Payload::Text(text) => ReplyBody::Text(text),
        Payload::Binary(bytes) => ReplyBody::Bytes(bytes),
    };
    let mut reply = Reply::new(record.status, reply_body);
    reply.headers = record.headers.clone();

    let mut expectation = Expectation::new(
        endpoint,
        &record.method,
        ValueMatcher::Exact(record.path.clone()),
        reply,
    );
    expectation.headers = record
        .reqheaders
        .iter()
        .map(|(name, value)| (name.clone(), ValueMatcher::Exact(value.clone())))
        .collect();
    expectation.body = body;
    Ok(expectation)
}

#[cfg(test)]
#[path = "defs_tests.rs"]
mod tests;
