// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expectation selection: the ranked-filter pipeline.
//!
//! Filters run in a fixed order (method, path, headers, body) and the
//! first surviving candidate in registration order wins. The head-only
//! phase is separately callable so the intercept/forward decision can be
//! made before the request body has streamed.

use crate::registry::{Lookup, Registered};
use crate::transport::RequestHead;
use std::sync::Arc;

/// Outcome of expectation selection for one request.
#[derive(Clone, Debug)]
pub enum MatchOutcome {
    /// The single applicable expectation, plus whether a scope filter
    /// redirected the lookup.
    Matched {
        expectation: Arc<Registered>,
        filtered: bool,
    },
    NoMatch,
    /// Nothing matched the body, but a body-independent match allows the
    /// real request to proceed.
    PassThroughAllowed,
}

/// Head-only filters: method (case-insensitive via uppercase
/// normalization), path matcher, and declared headers. Header matching is
/// a subset match; request headers not declared on the expectation are
/// ignored.
pub fn head_candidates(candidates: &[Arc<Registered>], head: &RequestHead) -> Vec<Arc<Registered>> {
    candidates
        .iter()
        .filter(|r| {
            let e = r.expectation();
            (e.persistent || r.remaining() > 0)
                && e.method == head.method
                && e.path.matches(&head.path)
                && e.headers.iter().all(|(name, matcher)| {
                    head.headers
                        .get(name)
                        .is_some_and(|value| matcher.matches(value))
                })
        })
        .cloned()
        .collect()
}

/// Full selection, body included, over the fully buffered request body.
pub fn select(lookup: &Lookup, head: &RequestHead, body: &[u8]) -> MatchOutcome {
    let survivors = head_candidates(&lookup.candidates, head);
    if survivors.is_empty() {
        return MatchOutcome::NoMatch;
    }
    for registered in &survivors {
        let applies = match &registered.expectation().body {
            None => true,
            Some(matcher) => matcher.matches(body),
        };
        if applies {
            return MatchOutcome::Matched {
                expectation: Arc::clone(registered),
                filtered: lookup.filtered,
            };
        }
    }
    if survivors.iter().any(|r| r.expectation().allow_unmocked) {
        MatchOutcome::PassThroughAllowed
    } else {
        MatchOutcome::NoMatch
    }
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
