// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replay-script rendering.
//!
//! A record renders as the text of the registration calls that reproduce
//! it: scope declaration, header-match clauses, method+path+body, and a
//! reply clause. Multiple records are joined by a fixed separator.

use crate::exchange::ExchangeRecord;
use serde_json::Value;

/// Literal separator printed between records.
pub const SCRIPT_SEPARATOR: &str = "\n<<<<<<-- cut here -->>>>>>\n";

/// Render one record as replay-script text.
pub fn render_record(record: &ExchangeRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("mock({})\n", quote(&record.scope)));
    for (name, value) in &record.reqheaders {
        out.push_str(&format!(
            "    .match_header({}, {})\n",
            quote(name),
            quote(value)
        ));
    }
    let method = record.method.to_ascii_lowercase();
    if is_empty_body(&record.body) {
        out.push_str(&format!("    .{}({})\n", method, quote(&record.path)));
    } else {
        out.push_str(&format!(
            "    .{}({}, {})\n",
            method,
            quote(&record.path),
            render_value(&record.body)
        ));
    }
    if record.headers.is_empty() {
        out.push_str(&format!(
            "    .reply({}, {});",
            record.status,
            render_value(&record.response)
        ));
    } else {
        let headers = serde_json::to_string(&record.headers).unwrap_or_default();
        out.push_str(&format!(
            "    .reply({}, {}, {});",
            record.status,
            render_value(&record.response),
            headers
        ));
    }
    out
}

/// Render a sequence of records joined by [`SCRIPT_SEPARATOR`].
pub fn render_script(records: &[ExchangeRecord]) -> String {
    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join(SCRIPT_SEPARATOR)
}

fn is_empty_body(value: &Value) -> bool {
    matches!(value, Value::Null) || matches!(value, Value::String(s) if s.is_empty())
}

fn render_value(value: &Value) -> String {
    // Value serialization to a string cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

fn quote(s: &str) -> String {
    render_value(&Value::String(s.to_string()))
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
