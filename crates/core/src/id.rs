// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation for log entries and runs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates identifiers that are distinct for the lifetime of the generator
pub trait IdGen: Clone + Send + Sync + 'static {
    fn next(&self) -> String;

    /// A short tag suitable for embedding in remote object names
    fn next_tag(&self) -> String {
        let id = self.next();
        id.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(8)
            .collect()
    }
}

/// UUID-based generator used by the binary
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter-based generator for tests: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("call")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}
