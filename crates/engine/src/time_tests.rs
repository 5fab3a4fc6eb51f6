// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[tokio::test]
async fn test_fake_clock_accounts_for_sleeps() {
    let clock = FakeClock::new();
    clock.sleep(Duration::from_millis(250)).await;
    clock.sleep(Duration::from_millis(50)).await;
    assert_eq!(clock.slept(), Duration::from_millis(300));
}

#[tokio::test]
async fn test_fake_clock_clones_share_accounting() {
    let clock = FakeClock::new();
    let shared = clock.clone();
    shared.sleep(Duration::from_millis(10)).await;
    assert_eq!(clock.slept(), Duration::from_millis(10));
}

#[tokio::test]
async fn test_system_clock_sleeps() {
    // Zero-duration sleep completes without hanging the test.
    SystemClock::new().sleep(Duration::ZERO).await;
}
