// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The request simulator: one intercepted exchange from first body chunk to
//! emitted response.

use crate::expectation::ReplyBody;
use crate::matching::{self, MatchOutcome};
use crate::policy::{NetConnectPolicy, PolicyError};
use crate::registry::{Registered, Registry};
use crate::time::Clock;
use crate::transport::{Decision, ForwardReason, RequestHead, ResponseSink};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Exchange lifecycle, advanced strictly forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangeState {
    Opened,
    BodyStreaming,
    Ended,
    ResponseEmitted,
    Closed,
}

/// Errors surfaced to the transport adapter for one exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// A matched reply declared a simulated transport failure.
    #[error("simulated request failure: {0}")]
    Simulated(String),

    #[error("exchange already completed")]
    Completed,
}

/// One intercepted exchange.
///
/// Buffers request body chunks as the caller writes them; full matching
/// (body included) runs once the request completes. State is per-exchange:
/// interleaved exchanges never share buffers.
pub struct Exchange {
    head: RequestHead,
    body: Vec<u8>,
    state: ExchangeState,
    registry: Arc<Registry>,
    policy: Arc<Mutex<NetConnectPolicy>>,
    clock: Arc<dyn Clock>,
}

impl Exchange {
    pub(crate) fn new(
        head: RequestHead,
        registry: Arc<Registry>,
        policy: Arc<Mutex<NetConnectPolicy>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            head,
            body: Vec::new(),
            state: ExchangeState::Opened,
            registry,
            policy,
            clock,
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    /// Buffer one request body chunk.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), ExchangeError> {
        match self.state {
            ExchangeState::Opened | ExchangeState::BodyStreaming => {
                self.state = ExchangeState::BodyStreaming;
                self.body.extend_from_slice(chunk);
                Ok(())
            }
            _ => Err(ExchangeError::Completed),
        }
    }

    /// Complete the request: run full matching against the buffered body
    /// and either drive the simulated response into `sink` or hand the
    /// request back for forwarding.
    ///
    /// Consumption is triggered exactly once, exactly when a match produced
    /// a reply.
    pub async fn end(&mut self, sink: &mut dyn ResponseSink) -> Result<Decision, ExchangeError> {
        match self.state {
            ExchangeState::Opened | ExchangeState::BodyStreaming => {}
            _ => return Err(ExchangeError::Completed),
        }
        self.state = ExchangeState::Ended;

        // Fresh lookup: expectations registered while the body streamed
        // participate, removed ones do not.
        let lookup = self.registry.lookup(&self.head.endpoint);
        match matching::select(&lookup, &self.head, &self.body) {
            MatchOutcome::Matched { expectation, .. } => self.emit(expectation, sink).await,
            MatchOutcome::PassThroughAllowed => {
                self.state = ExchangeState::Closed;
                Ok(Decision::Forward(ForwardReason::UnmockedAllowed))
            }
            MatchOutcome::NoMatch => {
                let host = self.head.endpoint.host_with_port();
                let decision = self.policy.lock().decide(&host);
                self.state = ExchangeState::Closed;
                decision?;
                Ok(Decision::Forward(ForwardReason::PolicyAllowed))
            }
        }
    }

    /// Abort the exchange: buffered chunks are released, the registry is
    /// untouched.
    pub fn abort(&mut self) {
        self.body = Vec::new();
        self.state = ExchangeState::Closed;
    }

    async fn emit(
        &mut self,
        registered: Arc<Registered>,
        sink: &mut dyn ResponseSink,
    ) -> Result<Decision, ExchangeError> {
        let reply = registered.expectation().reply.clone();

        if let Some(delay) = reply.delay {
            self.clock.sleep(delay).await;
        }

        if let ReplyBody::Fail(message) = &reply.body {
            // A declared failure is still a completed simulated exchange.
            self.registry.consume(&registered);
            self.state = ExchangeState::Closed;
            return Err(ExchangeError::Simulated(message.clone()));
        }

        sink.emit_response_headers(reply.status, &reply.headers);
        match reply.body {
            ReplyBody::Text(text) => {
                if !text.is_empty() {
                    sink.emit_response_chunk(text.as_bytes());
                }
            }
            ReplyBody::Json(value) => sink.emit_response_chunk(value.to_string().as_bytes()),
            ReplyBody::Bytes(bytes) => {
                if !bytes.is_empty() {
                    sink.emit_response_chunk(&bytes);
                }
            }
            ReplyBody::Chunks(chunks) => {
                for chunk in &chunks {
                    sink.emit_response_chunk(chunk);
                }
            }
            ReplyBody::FromRequest(f) => {
                let produced = f(&self.head, &self.body);
                sink.emit_response_chunk(&produced);
            }
            ReplyBody::Fail(_) => {} // handled above
        }
        self.state = ExchangeState::ResponseEmitted;
        sink.emit_response_end();

        self.registry.consume(&registered);
        self.state = ExchangeState::Closed;
        Ok(Decision::Replied)
    }
}

#[cfg(test)]
#[path = "exchange_tests.rs"]
mod tests;
