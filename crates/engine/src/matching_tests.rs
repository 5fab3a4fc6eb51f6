// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::endpoint::{Endpoint, Scheme};
use crate::expectation::{Expectation, Reply};
use crate::matcher::{BodyMatcher, ValueMatcher};
use crate::registry::Registry;
use rstest::rstest;
use serde_json::json;

fn endpoint() -> Endpoint {
    Endpoint::new(Scheme::Http, "api.test", None)
}

fn head(method: &str, path: &str) -> RequestHead {
    RequestHead::new(endpoint(), method, path)
}

fn expectation(method: &str, path: &str) -> Expectation {
    Expectation::new(
        endpoint(),
        method,
        ValueMatcher::from(path),
        Reply::new(200, "ok"),
    )
}

fn lookup_for(registry: &Registry) -> Lookup {
    registry.lookup(&endpoint())
}

#[rstest]
#[case("get")]
#[case("GET")]
#[case("GeT")]
fn test_method_is_case_insensitive(#[case] registered_as: &str) {
    let registry = Registry::new();
    registry.add(expectation(registered_as, "/items"));

    let survivors = head_candidates(&lookup_for(&registry).candidates, &head("GET", "/items"));
    assert_eq!(survivors.len(), 1);
}

#[test]
fn test_method_mismatch_filters_out() {
    let registry = Registry::new();
    registry.add(expectation("POST", "/items"));

    assert!(head_candidates(&lookup_for(&registry).candidates, &head("GET", "/items")).is_empty());
}

#[test]
fn test_path_regex_and_exact_candidates() {
    let registry = Registry::new();
    registry.add(expectation("GET", "/items"));
    let mut re = expectation("GET", "/ignored");
    re.path = ValueMatcher::regex(r"^/items$").unwrap();
    registry.add(re);

    let survivors = head_candidates(&lookup_for(&registry).candidates, &head("GET", "/items"));
    assert_eq!(survivors.len(), 2);
}

#[test]
fn test_declared_headers_must_all_match() {
    let registry = Registry::new();
    let mut e = expectation("GET", "/items");
    e.headers
        .insert("accept".to_string(), ValueMatcher::from("application/json"));
    e.headers
        .insert("x-token".to_string(), ValueMatcher::regex("^tok-").unwrap());
    registry.add(e);

    let matching = head("GET", "/items")
        .with_header("Accept", "application/json")
        .with_header("X-Token", "tok-123")
        .with_header("User-Agent", "test"); // undeclared, ignored
    assert_eq!(
        head_candidates(&lookup_for(&registry).candidates, &matching).len(),
        1
    );

    let missing = head("GET", "/items").with_header("Accept", "application/json");
    assert!(head_candidates(&lookup_for(&registry).candidates, &missing).is_empty());
}

#[test]
fn test_select_first_registered_wins() {
    let registry = Registry::new();
    let first = registry.add(expectation("GET", "/items"));
    registry.add(expectation("GET", "/items"));

    match select(&lookup_for(&registry), &head("GET", "/items"), b"") {
        MatchOutcome::Matched { expectation, .. } => assert_eq!(expectation.id(), first.id()),
        other => panic!("expected match, got {:?}", other),
    }
}

#[test]
fn test_select_no_candidates_is_no_match() {
    let registry = Registry::new();
    assert!(matches!(
        select(&lookup_for(&registry), &head("GET", "/items"), b""),
        MatchOutcome::NoMatch
    ));
}

#[test]
fn test_body_matcher_disambiguates() {
    let registry = Registry::new();
    let mut create = expectation("POST", "/items");
    create.body = Some(BodyMatcher::Json(json!({"op": "create"})));
    let create = registry.add(create);
    let mut delete = expectation("POST", "/items");
    delete.body = Some(BodyMatcher::Json(json!({"op": "delete"})));
    let delete = registry.add(delete);

    let outcome = select(
        &lookup_for(&registry),
        &head("POST", "/items"),
        br#"{"op": "delete"}"#,
    );
    match outcome {
        MatchOutcome::Matched { expectation, .. } => {
            assert_eq!(expectation.id(), delete.id());
            assert_ne!(expectation.id(), create.id());
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[test]
fn test_body_mismatch_without_fallback_is_no_match() {
    let registry = Registry::new();
    let mut e = expectation("POST", "/items");
    e.body = Some(BodyMatcher::from("expected"));
    registry.add(e);

    assert!(matches!(
        select(&lookup_for(&registry), &head("POST", "/items"), b"other"),
        MatchOutcome::NoMatch
    ));
}

#[test]
fn test_body_mismatch_with_fallback_allows_pass_through() {
    let registry = Registry::new();
    let mut e = expectation("POST", "/items");
    e.body = Some(BodyMatcher::from("expected"));
    e.allow_unmocked = true;
    registry.add(e);

    assert!(matches!(
        select(&lookup_for(&registry), &head("POST", "/items"), b"other"),
        MatchOutcome::PassThroughAllowed
    ));
}

#[test]
fn test_exhausted_candidates_are_skipped() {
    let registry = Registry::new();
    let spent = registry.add(expectation("GET", "/items"));
    registry.consume(&spent);
    let fresh = registry.add(expectation("GET", "/items"));

    match select(&lookup_for(&registry), &head("GET", "/items"), b"") {
        MatchOutcome::Matched { expectation, .. } => assert_eq!(expectation.id(), fresh.id()),
        other => panic!("expected match, got {:?}", other),
    }
}

#[test]
fn test_filtered_flag_propagates() {
    let registry = Registry::new();
    let mut e = expectation("GET", "/items");
    e.scope_filter = Some(std::sync::Arc::new(|_| true));
    registry.add(e);

    let other = Endpoint::new(Scheme::Http, "elsewhere.test", None);
    let lookup = registry.lookup(&other);
    let request = RequestHead::new(other, "GET", "/items");
    match select(&lookup, &request, b"") {
        MatchOutcome::Matched { filtered, .. } => assert!(filtered),
        other => panic!("expected filtered match, got {:?}", other),
    }
}
