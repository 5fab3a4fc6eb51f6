// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Body payload classification.
//!
//! Captured bodies are classified in a fixed order: binary signature first,
//! then structured JSON parse, else plain text. A failed JSON parse is not
//! an error; the payload quietly degrades to text.

use serde_json::Value;

/// A classified body payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Non-textual bytes; serialized as a hex string.
    Binary(Vec<u8>),
    /// JSON-parseable text, kept structured.
    Json(Value),
    /// Plain text.
    Text(String),
    /// No body.
    Empty,
}

impl Payload {
    /// Classify raw body bytes.
    pub fn classify(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Payload::Empty;
        }
        let text = match std::str::from_utf8(bytes) {
            Ok(text) if !has_binary_signature(bytes) => text,
            _ => return Payload::Binary(bytes.to_vec()),
        };
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(text.to_string()),
        }
    }

    /// Serialized form for a record field: binary becomes a hex string,
    /// JSON stays structured, text is emitted as-is.
    pub fn to_value(&self) -> Value {
        match self {
            Payload::Binary(bytes) => Value::String(hex::encode(bytes)),
            Payload::Json(value) => value.clone(),
            Payload::Text(text) => Value::String(text.clone()),
            Payload::Empty => Value::String(String::new()),
        }
    }

    /// Recover a payload from its serialized record field.
    ///
    /// A string field that looks like hex and does not decode to UTF-8 text
    /// is taken as a recorded binary body; every other string is text.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Payload::Empty,
            Value::String(s) if s.is_empty() => Payload::Empty,
            Value::String(s) => match decode_hex_binary(s) {
                Some(bytes) => Payload::Binary(bytes),
                None => Payload::Text(s.clone()),
            },
            other => Payload::Json(other.clone()),
        }
    }

    /// The raw bytes this payload stands for.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Payload::Binary(bytes) => bytes.clone(),
            Payload::Json(value) => value.to_string().into_bytes(),
            Payload::Text(text) => text.clone().into_bytes(),
            Payload::Empty => Vec::new(),
        }
    }

    /// Whether this payload carries no bytes.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

/// Control bytes other than tab/newline/carriage-return mark a body binary
/// even when it happens to be valid UTF-8.
fn has_binary_signature(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .any(|b| *b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
}

/// Decode a hex string back to bytes when the result is genuinely binary.
fn decode_hex_binary(s: &str) -> Option<Vec<u8>> {
    if s.len() < 2 || s.len() % 2 != 0 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex::decode(s).ok()?;
    if matches!(Payload::classify(&bytes), Payload::Binary(_)) {
        Some(bytes)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
