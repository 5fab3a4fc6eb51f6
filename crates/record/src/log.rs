// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorder log implementation.

use crate::exchange::ExchangeRecord;
use crate::script::render_record;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Ordered, clearable log of captured exchanges.
///
/// Clones share the same storage, so a log handed to an exchange observer
/// stays visible to the session that created it.
pub struct RecorderLog {
    records: Arc<Mutex<Vec<ExchangeRecord>>>,
    echo: Option<Arc<Mutex<Box<dyn Write + Send>>>>,
    echo_as_script: bool,
}

impl RecorderLog {
    /// Create a new in-memory recorder log.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            echo: None,
            echo_as_script: false,
        }
    }

    /// Create a log that echoes each record to `writer` as it is captured.
    ///
    /// With `as_script` set, the echo is replay-script text; otherwise each
    /// record is echoed as one line of JSON.
    pub fn with_echo(writer: Box<dyn Write + Send>, as_script: bool) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            echo: Some(Arc::new(Mutex::new(writer))),
            echo_as_script: as_script,
        }
    }

    /// Append a captured record.
    pub fn record(&self, record: ExchangeRecord) {
        if let Some(ref echo) = self.echo {
            let mut w = echo.lock();
            let rendered = if self.echo_as_script {
                render_record(&record)
            } else {
                serde_json::to_string(&record).unwrap_or_default()
            };
            let _ = writeln!(w, "{}", rendered);
            let _ = w.flush();
        }
        self.records.lock().push(record);
    }

    /// All captured records, in capture order.
    pub fn records(&self) -> Vec<ExchangeRecord> {
        self.records.lock().clone()
    }

    /// The total number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Clear all captured records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for RecorderLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecorderLog {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            echo: self.echo.as_ref().map(Arc::clone),
            echo_as_script: self.echo_as_script,
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
