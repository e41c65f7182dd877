// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Names of objects held by the remote object store

use serde::{Deserialize, Serialize};

/// Name of the object holding the ingested page
pub const CONTENT_OBJECT: &str = "webpage_content";
/// Name of the object holding the generated summary
pub const SUMMARY_OBJECT: &str = "webpage_summary";

/// Identifies a named object in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteObjectRef {
    pub name: String,
}

impl RemoteObjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for RemoteObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for RemoteObjectRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The pair of object names one run creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNames {
    /// Output of the ingest stage, input of the transform stage
    pub content: String,
    /// Output of the transform stage, read by the retrieve stage
    pub summary: String,
}

impl ObjectNames {
    /// The fixed names every run shares
    pub fn fixed() -> Self {
        Self {
            content: CONTENT_OBJECT.to_string(),
            summary: SUMMARY_OBJECT.to_string(),
        }
    }

    /// Names suffixed with a per-run tag so overlapping runs cannot collide
    pub fn scoped(tag: &str) -> Self {
        Self {
            content: format!("{}_{}", CONTENT_OBJECT, tag),
            summary: format!("{}_{}", SUMMARY_OBJECT, tag),
        }
    }
}

impl Default for ObjectNames {
    fn default() -> Self {
        Self::fixed()
    }
}
