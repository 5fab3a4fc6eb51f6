// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by netless are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Environment variable name constants.
pub mod names {
    /// Global interception kill-switch.
    pub const NETLESS_DISABLED: &str = "NETLESS_DISABLED";
}

/// `NETLESS_DISABLED` — when set to anything other than `0`/`false`, the
/// engine becomes transparent: every request is forwarded to the real
/// network and no matching is performed.
pub fn interception_disabled() -> bool {
    disabled_value(std::env::var(names::NETLESS_DISABLED).ok().as_deref())
}

fn disabled_value(value: Option<&str>) -> bool {
    match value {
        Some(v) => !matches!(v, "" | "0" | "false"),
        None => false,
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
