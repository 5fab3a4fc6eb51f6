// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recording sessions: observing live traffic instead of simulating it.

use crate::transport::{Headers, RequestHead};
use netless_record::{render_script, ExchangeRecord, RecorderLog};
use std::fmt;
use std::io::Write;
use thiserror::Error;

/// Errors from recorder session management.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("a recording session is already active")]
    DuplicateRecordingSession,
}

/// What the recorder emits when stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecorderOutput {
    /// Replay-script text, one entry per captured exchange.
    #[default]
    Script,
    /// Structured records.
    Records,
}

/// Recording session configuration.
#[derive(Default)]
pub struct RecorderConfig {
    pub output: RecorderOutput,
    /// Stream each capture is echoed to the moment it lands.
    pub echo: Option<Box<dyn Write + Send>>,
}

impl RecorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: RecorderOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_echo(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.echo = Some(writer);
        self
    }
}

impl fmt::Debug for RecorderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecorderConfig")
            .field("output", &self.output)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

/// Captured output drained when a session stops.
#[derive(Clone, Debug, PartialEq)]
pub enum Recording {
    /// Replay-script text; records are joined by the fixed separator.
    Script(String),
    /// Structured records.
    Records(Vec<ExchangeRecord>),
}

/// An active recording session.
pub(crate) struct RecorderSession {
    log: RecorderLog,
    output: RecorderOutput,
}

impl RecorderSession {
    pub(crate) fn start(config: RecorderConfig) -> Self {
        let as_script = config.output == RecorderOutput::Script;
        let log = match config.echo {
            Some(writer) => RecorderLog::with_echo(writer, as_script),
            None => RecorderLog::new(),
        };
        Self {
            log,
            output: config.output,
        }
    }

    pub(crate) fn log(&self) -> RecorderLog {
        self.log.clone()
    }

    pub(crate) fn clear(&self) {
        self.log.clear();
    }

    pub(crate) fn finish(self) -> Recording {
        let records = self.log.records();
        match self.output {
            RecorderOutput::Script => Recording::Script(render_script(&records)),
            RecorderOutput::Records => Recording::Records(records),
        }
    }
}

/// One observed live exchange during a recording session.
///
/// The transport adapter streams the real request body in, forwards the
/// request, and hands the real response back; the completed exchange lands
/// in the session log as a structured record.
pub struct RecordingExchange {
    head: RequestHead,
    body: Vec<u8>,
    log: RecorderLog,
    finished: bool,
}

impl RecordingExchange {
    pub(crate) fn new(head: RequestHead, log: RecorderLog) -> Self {
        Self {
            head,
            body: Vec::new(),
            log,
            finished: false,
        }
    }

    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    /// Buffer one live request body chunk.
    pub fn write_chunk(&mut self, chunk: &[u8]) {
        if !self.finished {
            self.body.extend_from_slice(chunk);
        }
    }

    /// Record the completed exchange from the real response parts.
    pub fn finish(mut self, status: u16, headers: Headers, response_body: &[u8]) {
        if self.finished {
            return;
        }
        self.finished = true;
        let record = ExchangeRecord::from_parts(
            self.head.endpoint.base_url(),
            self.head.method.clone(),
            self.head.path.clone(),
            &self.body,
            status,
            response_body,
            headers,
            self.head.headers.clone(),
        );
        self.log.record(record);
    }

    /// Drop the observation without recording anything.
    pub fn abort(mut self) {
        self.finished = true;
        self.body = Vec::new();
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
