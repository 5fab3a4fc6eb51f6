// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The expectation registry: ordered storage, lookup with scope-filter
//! override, and consumption bookkeeping.

use crate::endpoint::Endpoint;
use crate::expectation::Expectation;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// A registered expectation plus its registry bookkeeping.
#[derive(Debug)]
pub struct Registered {
    id: u64,
    expectation: Expectation,
    remaining: AtomicU32,
    uses: AtomicU32,
}

impl Registered {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    /// Uses left before removal. Meaningless for persistent expectations.
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Completed simulated exchanges served by this expectation.
    pub fn uses(&self) -> u32 {
        self.uses.load(Ordering::SeqCst)
    }

    pub fn is_persistent(&self) -> bool {
        self.expectation.persistent
    }

    /// Still awaiting at least one more use: a non-persistent expectation
    /// with uses left, or a persistent one that has never been hit.
    pub fn is_pending(&self) -> bool {
        if self.is_persistent() {
            self.uses() == 0
        } else {
            self.remaining() > 0
        }
    }
}

/// Result of an endpoint lookup.
#[derive(Clone, Debug)]
pub struct Lookup {
    /// Candidates in registration order; empty when nothing is filed.
    pub candidates: Vec<Arc<Registered>>,
    /// True when a scope filter redirected the lookup to another endpoint
    /// group.
    pub filtered: bool,
}

impl Lookup {
    fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            filtered: false,
        }
    }
}

struct Bucket {
    key: String,
    items: Vec<Arc<Registered>>,
}

/// Ordered registry of expectations keyed by canonical endpoint.
///
/// Buckets iterate in creation order and items within a bucket in
/// registration order, which makes both first-match selection and the
/// scope-filter override deterministic for a given registration order.
pub struct Registry {
    inner: Mutex<Vec<Bucket>>,
    next_id: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append an expectation to its endpoint's ordered list.
    pub fn add(&self, expectation: Expectation) -> Arc<Registered> {
        let key = expectation.endpoint.key();
        let registered = Arc::new(Registered {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            remaining: AtomicU32::new(expectation.times.max(1)),
            uses: AtomicU32::new(0),
            expectation,
        });
        let mut inner = self.inner.lock();
        match inner.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.items.push(Arc::clone(&registered)),
            None => inner.push(Bucket {
                key,
                items: vec![Arc::clone(&registered)],
            }),
        }
        registered
    }

    /// Remove a specific record. No-op for persistent expectations, whose
    /// removal is governed by explicit clears only.
    pub fn remove(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        let mut removed = false;
        for bucket in inner.iter_mut() {
            if let Some(pos) = bucket.items.iter().position(|r| r.id == id) {
                if bucket.items[pos].is_persistent() {
                    return false;
                }
                bucket.items.remove(pos);
                removed = true;
                break;
            }
        }
        if removed {
            inner.retain(|b| !b.items.is_empty());
        }
        removed
    }

    /// Clear every endpoint's list. Full reset between test cases.
    pub fn remove_all(&self) {
        self.inner.lock().clear();
    }

    /// Ordered candidates for an endpoint.
    ///
    /// If any registered expectation anywhere carries a scope filter that
    /// accepts the requested endpoint's base URL, the first such filter in
    /// registration order redirects the lookup to that expectation's entire
    /// endpoint group and the result is flagged filtered.
    pub fn lookup(&self, endpoint: &Endpoint) -> Lookup {
        let inner = self.inner.lock();
        let base = endpoint.base_url();
        for bucket in inner.iter() {
            for item in &bucket.items {
                if let Some(filter) = &item.expectation.scope_filter {
                    if filter(&base) {
                        return Lookup {
                            candidates: bucket.items.clone(),
                            filtered: true,
                        };
                    }
                }
            }
        }
        let key = endpoint.key();
        match inner.iter().find(|b| b.key == key) {
            Some(bucket) => Lookup {
                candidates: bucket.items.clone(),
                filtered: false,
            },
            None => Lookup::empty(),
        }
    }

    /// Consume one use after a completed simulated exchange.
    ///
    /// Runs entirely under the registry lock: the decrement and the removal
    /// at zero are one atomic step, so interleaved exchanges never observe
    /// the same pre-decrement value.
    pub fn consume(&self, registered: &Arc<Registered>) {
        let mut inner = self.inner.lock();
        registered.uses.fetch_add(1, Ordering::SeqCst);
        if registered.is_persistent() {
            return;
        }
        if registered.remaining.load(Ordering::SeqCst) == 0 {
            return;
        }
        let prev = registered.remaining.fetch_sub(1, Ordering::SeqCst);
        if prev <= 1 {
            for bucket in inner.iter_mut() {
                bucket.items.retain(|r| r.id != registered.id);
            }
            inner.retain(|b| !b.items.is_empty());
        }
    }

    /// Every registered expectation, in registration order across buckets.
    pub fn all(&self) -> Vec<Arc<Registered>> {
        self.inner
            .lock()
            .iter()
            .flat_map(|b| b.items.iter().cloned())
            .collect()
    }

    /// Descriptions of expectations still awaiting use.
    pub fn pending(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|r| r.is_pending())
            .map(|r| r.expectation.describe())
            .collect()
    }

    /// True when no expectation is still awaiting use.
    pub fn is_done(&self) -> bool {
        self.pending().is_empty()
    }

    /// Total registered expectations.
    pub fn len(&self) -> usize {
        self.inner.lock().iter().map(|b| b.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
