// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction for deterministic testing.
//!
//! Artificial reply delays go through a `Clock` trait so tests can assert
//! delay behavior without wall-clock sleeps.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Clock trait for time abstraction.
pub trait Clock: Send + Sync {
    /// Sleep for a duration.
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real clock backed by the tokio timer.
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Fake clock that completes sleeps instantly while accounting for them.
///
/// Tests read back the total slept duration to assert a declared delay was
/// honored.
#[derive(Clone, Debug, Default)]
pub struct FakeClock {
    slept_millis: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time slept through this clock.
    pub fn slept(&self) -> Duration {
        Duration::from_millis(self.slept_millis.load(Ordering::SeqCst))
    }
}

impl Clock for FakeClock {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.slept_millis
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
        Box::pin(std::future::ready(()))
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
