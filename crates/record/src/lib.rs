// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Traffic capture and replay serialization for netless.
//!
//! This crate buffers live HTTP exchanges, classifies their payloads as
//! binary, JSON, or plain text, and serializes captured traffic either as
//! structured records or as replay-script text.

mod classify;
mod exchange;
mod log;
mod script;

pub use classify::Payload;
pub use exchange::{ExchangeRecord, RecordedHeaders};
pub use log::RecorderLog;
pub use script::{render_record, render_script, SCRIPT_SEPARATOR};
