// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn test_exact_matches_whole_string_only() {
    let matcher = ValueMatcher::from("/items");
    assert!(matcher.matches("/items"));
    assert!(!matcher.matches("/items/1"));
    assert!(!matcher.matches("/Items"));
}

#[test]
fn test_regex_matcher() {
    let matcher = ValueMatcher::regex(r"^/items/\d+$").unwrap();
    assert!(matcher.matches("/items/42"));
    assert!(!matcher.matches("/items/abc"));
}

#[test]
fn test_glob_matcher() {
    let matcher = ValueMatcher::glob("/static/*.css").unwrap();
    assert!(matcher.matches("/static/site.css"));
    assert!(!matcher.matches("/static/site.js"));
}

#[test]
fn test_predicate_matcher() {
    let matcher = ValueMatcher::predicate(|path| path.contains("?page="));
    assert!(matcher.matches("/items?page=2"));
    assert!(!matcher.matches("/items"));
}

#[test]
fn test_invalid_patterns_are_errors() {
    assert!(ValueMatcher::regex("(unclosed").is_err());
    assert!(ValueMatcher::glob("a**b***c[").is_err());
}

#[parameterized(
    exact = { ValueMatcher::from("/a"), "/a" },
    glob = { ValueMatcher::glob("/a/*").unwrap(), "/a/*" },
    predicate = { ValueMatcher::predicate(|_| true), "<predicate>" },
)]
fn test_describe(matcher: ValueMatcher, expected: &str) {
    assert_eq!(matcher.describe(), expected);
}

#[test]
fn test_describe_regex_is_delimited() {
    let matcher = ValueMatcher::regex("^/x$").unwrap();
    assert_eq!(matcher.describe(), "/^/x$/");
}

#[test]
fn test_json_body_matches_structurally() {
    let matcher = BodyMatcher::from(json!({"b": 2, "a": 1}));
    // Key order and whitespace do not matter.
    assert!(matcher.matches(br#"{ "a": 1, "b": 2 }"#));
    assert!(!matcher.matches(br#"{"a": 1}"#));
    assert!(!matcher.matches(b"not json"));
}

#[test]
fn test_text_body_matches_exactly() {
    let matcher = BodyMatcher::from("name=widget");
    assert!(matcher.matches(b"name=widget"));
    assert!(!matcher.matches(b"name=widget&x=1"));
}

#[test]
fn test_text_body_rejects_non_utf8() {
    let matcher = BodyMatcher::from("abc");
    assert!(!matcher.matches(&[0xff, 0xfe]));
}

#[test]
fn test_bytes_body_matches_binary() {
    let matcher = BodyMatcher::Bytes(vec![0xde, 0xad]);
    assert!(matcher.matches(&[0xde, 0xad]));
    assert!(!matcher.matches(&[0xde, 0xad, 0x00]));
}

#[test]
fn test_pattern_body_matcher() {
    let matcher = BodyMatcher::Pattern(regex::Regex::new(r#""name":\s*"widget""#).unwrap());
    assert!(matcher.matches(br#"{"name": "widget"}"#));
    assert!(!matcher.matches(br#"{"name": "gadget"}"#));
}

#[test]
fn test_predicate_body_matcher() {
    let matcher = BodyMatcher::predicate(|body| body.len() > 3);
    assert!(matcher.matches(b"long enough"));
    assert!(!matcher.matches(b"no"));
}

#[test]
fn test_debug_does_not_leak_predicate_internals() {
    let debug = format!("{:?}", ValueMatcher::predicate(|_| true));
    assert!(debug.contains("Predicate"));
    let debug = format!("{:?}", BodyMatcher::predicate(|_| true));
    assert!(debug.contains("Predicate"));
}
