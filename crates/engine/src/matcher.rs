// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tagged matcher variants for paths, header values, hosts, and bodies.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate over a string-valued field.
pub type StrPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Predicate over raw body bytes.
pub type BytesPredicate = Arc<dyn Fn(&[u8]) -> bool + Send + Sync>;

/// Matcher over a string-valued request field: path, header value, or host.
#[derive(Clone)]
pub enum ValueMatcher {
    /// Exact string equality.
    Exact(String),
    /// Regex test.
    Pattern(Regex),
    /// Shell-style glob.
    Glob(glob::Pattern),
    /// Arbitrary predicate.
    Predicate(StrPredicate),
}

impl ValueMatcher {
    /// Compile a regex matcher.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(ValueMatcher::Pattern(Regex::new(pattern)?))
    }

    /// Compile a glob matcher.
    pub fn glob(pattern: &str) -> Result<Self, glob::PatternError> {
        Ok(ValueMatcher::Glob(glob::Pattern::new(pattern)?))
    }

    /// Wrap a predicate function.
    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        ValueMatcher::Predicate(Arc::new(f))
    }

    /// Test a value against the matcher.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ValueMatcher::Exact(expected) => value == expected,
            ValueMatcher::Pattern(re) => re.is_match(value),
            ValueMatcher::Glob(pattern) => pattern.matches(value),
            ValueMatcher::Predicate(f) => f(value),
        }
    }

    /// Short human-readable form for listings.
    pub fn describe(&self) -> String {
        match self {
            ValueMatcher::Exact(s) => s.clone(),
            ValueMatcher::Pattern(re) => format!("/{}/", re.as_str()),
            ValueMatcher::Glob(pattern) => pattern.as_str().to_string(),
            ValueMatcher::Predicate(_) => "<predicate>".to_string(),
        }
    }
}

impl fmt::Debug for ValueMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueMatcher::Exact(s) => f.debug_tuple("Exact").field(s).finish(),
            ValueMatcher::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            ValueMatcher::Glob(p) => f.debug_tuple("Glob").field(&p.as_str()).finish(),
            ValueMatcher::Predicate(_) => f.debug_struct("Predicate").finish_non_exhaustive(),
        }
    }
}

impl From<&str> for ValueMatcher {
    fn from(s: &str) -> Self {
        ValueMatcher::Exact(s.to_string())
    }
}

impl From<String> for ValueMatcher {
    fn from(s: String) -> Self {
        ValueMatcher::Exact(s)
    }
}

impl From<Regex> for ValueMatcher {
    fn from(re: Regex) -> Self {
        ValueMatcher::Pattern(re)
    }
}

/// Matcher over a fully buffered request body.
#[derive(Clone)]
pub enum BodyMatcher {
    /// Structural comparison against the JSON-parsed body.
    Json(Value),
    /// Exact text equality.
    Text(String),
    /// Exact byte equality.
    Bytes(Vec<u8>),
    /// Regex test over the UTF-8 body.
    Pattern(Regex),
    /// Arbitrary predicate over the raw bytes.
    Predicate(BytesPredicate),
}

impl BodyMatcher {
    /// Wrap a predicate function.
    pub fn predicate(f: impl Fn(&[u8]) -> bool + Send + Sync + 'static) -> Self {
        BodyMatcher::Predicate(Arc::new(f))
    }

    /// Test buffered body bytes against the matcher.
    ///
    /// `Json` parses the body and compares structurally, so key order and
    /// whitespace differences do not break the match.
    pub fn matches(&self, body: &[u8]) -> bool {
        match self {
            BodyMatcher::Json(expected) => serde_json::from_slice::<Value>(body)
                .map(|parsed| parsed == *expected)
                .unwrap_or(false),
            BodyMatcher::Text(expected) => {
                std::str::from_utf8(body).map(|s| s == expected).unwrap_or(false)
            }
            BodyMatcher::Bytes(expected) => body == expected.as_slice(),
            BodyMatcher::Pattern(re) => std::str::from_utf8(body)
                .map(|s| re.is_match(s))
                .unwrap_or(false),
            BodyMatcher::Predicate(f) => f(body),
        }
    }
}

impl fmt::Debug for BodyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyMatcher::Json(v) => f.debug_tuple("Json").field(v).finish(),
            BodyMatcher::Text(s) => f.debug_tuple("Text").field(s).finish(),
            BodyMatcher::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            BodyMatcher::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            BodyMatcher::Predicate(_) => f.debug_struct("Predicate").finish_non_exhaustive(),
        }
    }
}

impl From<&str> for BodyMatcher {
    fn from(s: &str) -> Self {
        BodyMatcher::Text(s.to_string())
    }
}

impl From<String> for BodyMatcher {
    fn from(s: String) -> Self {
        BodyMatcher::Text(s)
    }
}

impl From<Value> for BodyMatcher {
    fn from(v: Value) -> Self {
        BodyMatcher::Json(v)
    }
}

impl From<Regex> for BodyMatcher {
    fn from(re: Regex) -> Self {
        BodyMatcher::Pattern(re)
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
