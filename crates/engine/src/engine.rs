// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The engine context: registry, policy, recorder slot, and clock.
//!
//! Engines are explicit, independently constructible objects; tests create
//! one per case instead of sharing process-wide state.

use crate::defs::{self, DefsError};
use crate::env;
use crate::exchange::{Exchange, ExchangeError};
use crate::expectation::Expectation;
use crate::matcher::ValueMatcher;
use crate::matching;
use crate::policy::NetConnectPolicy;
use crate::recorder::{RecorderConfig, RecorderError, RecorderSession, Recording, RecordingExchange};
use crate::registry::{Registered, Registry};
use crate::time::{Clock, SystemClock};
use crate::transport::{ForwardReason, RequestHead};
use netless_record::ExchangeRecord;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// How the engine will handle a started exchange.
pub enum ExchangeStart {
    /// The exchange is intercepted; stream the body in and call `end`.
    Intercept(Exchange),
    /// A recording session is active; forward the real request and hand
    /// the response back through the recording exchange.
    Record(RecordingExchange),
    /// Forward to the real network without interception.
    Forward(ForwardReason),
}

impl std::fmt::Debug for ExchangeStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeStart::Intercept(_) => f.write_str("Intercept(..)"),
            ExchangeStart::Record(_) => f.write_str("Record(..)"),
            ExchangeStart::Forward(reason) => {
                f.debug_tuple("Forward").field(reason).finish()
            }
        }
    }
}

/// An interception engine instance.
pub struct Engine {
    registry: Arc<Registry>,
    policy: Arc<Mutex<NetConnectPolicy>>,
    recorder: Mutex<Option<RecorderSession>>,
    clock: Arc<dyn Clock>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create an engine over a caller-supplied clock; tests pass a
    /// [`crate::time::FakeClock`] to assert delay behavior.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            policy: Arc::new(Mutex::new(NetConnectPolicy::AllowAll)),
            recorder: Mutex::new(None),
            clock,
        }
    }

    /// Register an expectation.
    pub fn register(&self, expectation: Expectation) -> Arc<Registered> {
        self.registry.add(expectation)
    }

    /// Remove a specific expectation. No-op for persistent ones.
    pub fn remove_expectation(&self, id: u64) -> bool {
        self.registry.remove(id)
    }

    /// Clear every registered expectation.
    pub fn remove_all_expectations(&self) {
        self.registry.remove_all();
    }

    /// Allow pass-through for all hosts, or only those the pattern accepts.
    pub fn enable_net_connect(&self, pattern: Option<ValueMatcher>) {
        *self.policy.lock() = match pattern {
            Some(matcher) => NetConnectPolicy::AllowMatching(matcher),
            None => NetConnectPolicy::AllowAll,
        };
    }

    /// Deny pass-through for every host.
    pub fn disable_net_connect(&self) {
        *self.policy.lock() = NetConnectPolicy::DenyAll;
    }

    /// Descriptions of expectations still awaiting use.
    pub fn pending(&self) -> Vec<String> {
        self.registry.pending()
    }

    /// True when every expectation has been used.
    pub fn is_done(&self) -> bool {
        self.registry.is_done()
    }

    /// The shared registry, for diagnostics.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Register every record from a definition file, in file order.
    pub fn load_defs(&self, path: &Path) -> Result<Vec<Arc<Registered>>, DefsError> {
        self.define(&defs::load(path)?)
    }

    /// Register expectations built from structured records.
    pub fn define(&self, records: &[ExchangeRecord]) -> Result<Vec<Arc<Registered>>, DefsError> {
        records
            .iter()
            .map(|record| Ok(self.registry.add(defs::to_expectation(record)?)))
            .collect()
    }

    /// Start a recording session. Recording is mutually exclusive with
    /// simulation; starting while a session is active is an error.
    pub fn record_start(&self, config: RecorderConfig) -> Result<(), RecorderError> {
        let mut recorder = self.recorder.lock();
        if recorder.is_some() {
            return Err(RecorderError::DuplicateRecordingSession);
        }
        *recorder = Some(RecorderSession::start(config));
        Ok(())
    }

    /// Stop the active recording session and drain its output.
    pub fn record_stop(&self) -> Option<Recording> {
        self.recorder.lock().take().map(RecorderSession::finish)
    }

    /// Discard everything the active session has captured so far, keeping
    /// the session running.
    pub fn record_clear(&self) {
        if let Some(session) = self.recorder.lock().as_ref() {
            session.clear();
        }
    }

    /// Whether a recording session is active.
    pub fn recording(&self) -> bool {
        self.recorder.lock().is_some()
    }

    /// Full reset: registry cleared, policy back to allow-all, recorder
    /// stopped and discarded.
    pub fn reset(&self) {
        self.registry.remove_all();
        *self.policy.lock() = NetConnectPolicy::AllowAll;
        *self.recorder.lock() = None;
    }

    /// Handle a request-started event from the transport hook.
    ///
    /// The head-only pre-check runs here so streaming clients get their
    /// intercept/forward decision before any body bytes: a request whose
    /// head matches no expectation is forwarded (or refused) immediately.
    pub fn begin_exchange(&self, head: RequestHead) -> Result<ExchangeStart, ExchangeError> {
        if env::interception_disabled() {
            return Ok(ExchangeStart::Forward(ForwardReason::Disabled));
        }

        if let Some(session) = self.recorder.lock().as_ref() {
            return Ok(ExchangeStart::Record(RecordingExchange::new(
                head,
                session.log(),
            )));
        }

        let lookup = self.registry.lookup(&head.endpoint);
        if matching::head_candidates(&lookup.candidates, &head).is_empty() {
            let host = head.endpoint.host_with_port();
            self.policy.lock().decide(&host)?;
            return Ok(ExchangeStart::Forward(ForwardReason::PolicyAllowed));
        }

        Ok(ExchangeStart::Intercept(Exchange::new(
            head,
            Arc::clone(&self.registry),
            Arc::clone(&self.policy),
            Arc::clone(&self.clock),
        )))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
