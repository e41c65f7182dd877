// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only record of every remote store call

use crate::clock::{Clock, SystemClock};
use crate::id::{IdGen, UuidIdGen};
use crate::wire::HttpMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// What came back from a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallOutcome {
    /// The store answered; `status` may be any HTTP status
    Responded { status: u16, body: Value },
    /// No response was received
    Failed { error: String },
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Responded { status, .. } if (200..300).contains(status))
    }
}

/// One logged call. Entries are never modified once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub method: HttpMethod,
    pub endpoint: String,
    pub request: Option<Value>,
    pub response: CallOutcome,
}

/// Ordered log of store calls
#[derive(Debug, Clone)]
pub struct ApiCallLog<C = SystemClock, I = UuidIdGen> {
    entries: Vec<ApiLogEntry>,
    clock: C,
    ids: I,
}

impl Default for ApiCallLog {
    fn default() -> Self {
        Self::new(SystemClock, UuidIdGen)
    }
}

impl<C: Clock, I: IdGen> ApiCallLog<C, I> {
    pub fn new(clock: C, ids: I) -> Self {
        Self {
            entries: Vec::new(),
            clock,
            ids,
        }
    }

    /// Append an entry stamped with the current time and a fresh id
    pub fn record(
        &mut self,
        method: HttpMethod,
        endpoint: impl Into<String>,
        request: Option<Value>,
        response: CallOutcome,
    ) -> &ApiLogEntry {
        let entry = ApiLogEntry {
            id: self.ids.next(),
            timestamp: self.clock.now(),
            method,
            endpoint: endpoint.into(),
            request,
            response,
        };
        tracing::debug!(
            id = %entry.id,
            method = %entry.method,
            endpoint = %entry.endpoint,
            success = entry.response.is_success(),
            "api call recorded"
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[ApiLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Only a new run or a reset does this.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write entries as JSON Lines, oldest first
    pub fn write_jsonl(&self, mut writer: impl Write) -> std::io::Result<()> {
        write_entries(&self.entries, &mut writer)
    }

    /// Export entries to a JSON Lines file, replacing it if present
    pub fn export(&self, path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_jsonl(&mut writer)?;
        writer.flush()
    }
}

/// Write a slice of entries as JSON Lines
pub fn write_entries(entries: &[ApiLogEntry], writer: &mut impl Write) -> std::io::Result<()> {
    for entry in entries {
        let json = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)?;
    }
    Ok(())
}

/// Read entries back from JSON Lines, skipping blank lines
pub fn read_entries(text: &str) -> Result<Vec<ApiLogEntry>, serde_json::Error> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
#[path = "call_log_tests.rs"]
mod tests;
