// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Net-connect policy for requests with no matching expectation.

use crate::matcher::ValueMatcher;
use thiserror::Error;

/// Raised when no expectation matches and the policy denies pass-through.
///
/// Carries the blocked host so calling code's ordinary error-handling path
/// sees it exactly as it would a real connection failure.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("net connect disallowed for \"{host}\"")]
    NetConnectBlocked { host: String },
}

/// Tri-state pass-through policy, tested against the canonical
/// `host:port` string.
#[derive(Debug, Default)]
pub enum NetConnectPolicy {
    /// Forward any host.
    #[default]
    AllowAll,
    /// Block every host.
    DenyAll,
    /// Forward hosts the pattern accepts, block the rest.
    AllowMatching(ValueMatcher),
}

impl NetConnectPolicy {
    /// Decide pass-through for a host, failing with the blocked host in the
    /// error detail.
    pub fn decide(&self, host: &str) -> Result<(), PolicyError> {
        let allowed = match self {
            NetConnectPolicy::AllowAll => true,
            NetConnectPolicy::DenyAll => false,
            NetConnectPolicy::AllowMatching(matcher) => matcher.matches(host),
        };
        if allowed {
            Ok(())
        } else {
            Err(PolicyError::NetConnectBlocked {
                host: host.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
