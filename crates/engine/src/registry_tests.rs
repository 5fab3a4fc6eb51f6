// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::endpoint::Scheme;
use crate::expectation::Reply;
use crate::matcher::ValueMatcher;

fn endpoint(host: &str) -> Endpoint {
    Endpoint::new(Scheme::Http, host, None)
}

fn expectation(host: &str, path: &str) -> Expectation {
    Expectation::new(
        endpoint(host),
        "GET",
        ValueMatcher::from(path),
        Reply::new(200, "ok"),
    )
}

#[test]
fn test_add_preserves_registration_order() {
    let registry = Registry::new();
    registry.add(expectation("api.test", "/first"));
    registry.add(expectation("api.test", "/second"));

    let lookup = registry.lookup(&endpoint("api.test"));
    assert_eq!(lookup.candidates.len(), 2);
    assert_eq!(lookup.candidates[0].expectation().path.describe(), "/first");
    assert_eq!(lookup.candidates[1].expectation().path.describe(), "/second");
    assert!(!lookup.filtered);
}

#[test]
fn test_lookup_unknown_endpoint_is_empty() {
    let registry = Registry::new();
    registry.add(expectation("api.test", "/x"));
    assert!(registry.lookup(&endpoint("other.test")).candidates.is_empty());
}

#[test]
fn test_lookup_ignores_port_spelling() {
    let registry = Registry::new();
    registry.add(expectation("api.test:80", "/x"));
    let lookup = registry.lookup(&endpoint("api.test"));
    assert_eq!(lookup.candidates.len(), 1);
}

#[test]
fn test_consume_removes_at_zero() {
    let registry = Registry::new();
    let registered = registry.add(expectation("api.test", "/once"));
    assert_eq!(registered.remaining(), 1);

    registry.consume(&registered);
    assert_eq!(registered.uses(), 1);
    assert!(registry.is_empty());
    assert!(registry.lookup(&endpoint("api.test")).candidates.is_empty());
}

#[test]
fn test_consume_multi_use_counts_down() {
    let registry = Registry::new();
    let mut e = expectation("api.test", "/thrice");
    e.times = 3;
    let registered = registry.add(e);

    registry.consume(&registered);
    registry.consume(&registered);
    assert_eq!(registered.remaining(), 1);
    assert_eq!(registry.len(), 1);

    registry.consume(&registered);
    assert!(registry.is_empty());
}

#[test]
fn test_persistent_expectation_survives_consumption() {
    let registry = Registry::new();
    let mut e = expectation("api.test", "/forever");
    e.persistent = true;
    let registered = registry.add(e);

    for _ in 0..5 {
        registry.consume(&registered);
    }
    assert_eq!(registry.len(), 1);
    assert_eq!(registered.uses(), 5);
}

#[test]
fn test_over_consumption_does_not_underflow() {
    let registry = Registry::new();
    let registered = registry.add(expectation("api.test", "/once"));
    registry.consume(&registered);
    registry.consume(&registered);
    assert_eq!(registered.remaining(), 0);
}

#[test]
fn test_remove_is_noop_for_persistent() {
    let registry = Registry::new();
    let mut e = expectation("api.test", "/kept");
    e.persistent = true;
    let registered = registry.add(e);

    assert!(!registry.remove(registered.id()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_remove_drops_specific_record() {
    let registry = Registry::new();
    let first = registry.add(expectation("api.test", "/a"));
    registry.add(expectation("api.test", "/b"));

    assert!(registry.remove(first.id()));
    let lookup = registry.lookup(&endpoint("api.test"));
    assert_eq!(lookup.candidates.len(), 1);
    assert_eq!(lookup.candidates[0].expectation().path.describe(), "/b");
}

#[test]
fn test_remove_all_clears_persistent_too() {
    let registry = Registry::new();
    let mut e = expectation("api.test", "/kept");
    e.persistent = true;
    registry.add(e);
    registry.add(expectation("other.test", "/x"));

    registry.remove_all();
    assert!(registry.is_empty());
}

#[test]
fn test_scope_filter_redirects_lookup() {
    let registry = Registry::new();
    registry.add(expectation("plain.test", "/plain"));
    let mut filtered = expectation("dynamic.test", "/filtered");
    filtered.scope_filter = Some(Arc::new(|base: &str| base.contains("session-")));
    registry.add(filtered);

    let lookup = registry.lookup(&endpoint("session-123.test"));
    assert!(lookup.filtered);
    assert_eq!(lookup.candidates.len(), 1);
    assert_eq!(
        lookup.candidates[0].expectation().path.describe(),
        "/filtered"
    );
}

#[test]
fn test_scope_filter_returns_whole_endpoint_group() {
    let registry = Registry::new();
    let mut filtered = expectation("dynamic.test", "/one");
    filtered.scope_filter = Some(Arc::new(|base: &str| base.contains("session-")));
    registry.add(filtered);
    registry.add(expectation("dynamic.test", "/two"));

    let lookup = registry.lookup(&endpoint("session-123.test"));
    assert!(lookup.filtered);
    assert_eq!(lookup.candidates.len(), 2);
}

#[test]
fn test_first_registered_filter_wins() {
    let registry = Registry::new();
    let mut a = expectation("a.test", "/a");
    a.scope_filter = Some(Arc::new(|_| true));
    registry.add(a);
    let mut b = expectation("b.test", "/b");
    b.scope_filter = Some(Arc::new(|_| true));
    registry.add(b);

    let lookup = registry.lookup(&endpoint("anything.test"));
    assert_eq!(lookup.candidates[0].expectation().path.describe(), "/a");
}

#[test]
fn test_non_matching_filter_falls_back_to_exact_key() {
    let registry = Registry::new();
    let mut filtered = expectation("dynamic.test", "/filtered");
    filtered.scope_filter = Some(Arc::new(|_| false));
    registry.add(filtered);
    registry.add(expectation("api.test", "/exact"));

    let lookup = registry.lookup(&endpoint("api.test"));
    assert!(!lookup.filtered);
    assert_eq!(lookup.candidates.len(), 1);
    assert_eq!(lookup.candidates[0].expectation().path.describe(), "/exact");
}

#[test]
fn test_pending_and_is_done() {
    let registry = Registry::new();
    let single = registry.add(expectation("api.test", "/once"));
    let mut p = expectation("api.test", "/kept");
    p.persistent = true;
    let persistent = registry.add(p);

    assert_eq!(registry.pending().len(), 2);
    assert!(!registry.is_done());

    registry.consume(&single);
    registry.consume(&persistent);
    assert!(registry.is_done());
    assert!(registry.pending().is_empty());
}

#[test]
fn test_concurrent_consumption_reaches_zero_exactly_once() {
    let registry = Arc::new(Registry::new());
    let mut e = expectation("api.test", "/shared");
    e.times = 8;
    let registered = registry.add(e);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let registered = Arc::clone(&registered);
            std::thread::spawn(move || registry.consume(&registered))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registered.remaining(), 0);
    assert_eq!(registered.uses(), 8);
    assert!(registry.is_empty());
}
