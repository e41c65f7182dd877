// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake object store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ObjectStore, StoreError, StoreResponse};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Store operation kinds, used to script results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateUrlObject,
    ApplyPrompt,
    ReadObject,
    DeleteObject,
}

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CreateUrlObject {
        name: String,
        urls: Vec<String>,
    },
    ApplyPrompt {
        output_name: String,
        prompt: String,
        input_name: String,
    },
    ReadObject {
        name: String,
    },
    DeleteObject {
        name: String,
    },
}

type Scripted = Result<StoreResponse, StoreError>;

#[derive(Default)]
struct FakeState {
    calls: Vec<StoreCall>,
    scripted: HashMap<StoreOp, VecDeque<Scripted>>,
    holds: HashMap<StoreOp, Arc<Notify>>,
}

/// Fake object store for testing
///
/// Every call succeeds with a plausible body unless a result was scripted
/// for its operation. Scripted results are consumed in order.
#[derive(Clone, Default)]
pub struct FakeObjectStore {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Queue a result for the next call of `op`
    pub fn script(&self, op: StoreOp, result: Scripted) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .scripted
            .entry(op)
            .or_default()
            .push_back(result);
    }

    /// Queue a 2xx response with the given body
    pub fn respond(&self, op: StoreOp, body: Value) {
        self.script(op, Ok(StoreResponse::ok(body)));
    }

    /// Queue a non-2xx response
    pub fn fail_with_status(&self, op: StoreOp, status: u16, detail: Option<&str>) {
        let body = match detail {
            Some(d) => json!({ "detail": d }),
            None => json!({}),
        };
        self.script(op, Err(StoreError::from_response(status, body)));
    }

    /// Queue a transport failure
    pub fn fail_transport(&self, op: StoreOp, message: &str) {
        self.script(op, Err(StoreError::Transport(message.to_string())));
    }

    /// Make every later call of `op` wait until the returned handle is notified
    ///
    /// The call is recorded before it waits.
    pub fn hold(&self, op: StoreOp) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .holds
            .insert(op, Arc::clone(&notify));
        notify
    }

    async fn handle(&self, op: StoreOp, call: StoreCall) -> Scripted {
        let (result, hold) = {
            let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(call);
            let result = state
                .scripted
                .get_mut(&op)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| Ok(default_response(op)));
            (result, state.holds.get(&op).cloned())
        };

        if let Some(notify) = hold {
            notify.notified().await;
        }
        result
    }
}

fn default_response(op: StoreOp) -> StoreResponse {
    match op {
        StoreOp::CreateUrlObject | StoreOp::ApplyPrompt => {
            StoreResponse::ok(json!({ "status": "ok" }))
        }
        StoreOp::ReadObject => StoreResponse::ok(json!({ "text_value": "A fake summary." })),
        StoreOp::DeleteObject => StoreResponse {
            status: 204,
            body: Value::Null,
        },
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn create_url_object(
        &self,
        name: &str,
        urls: &[String],
    ) -> Result<StoreResponse, StoreError> {
        self.handle(
            StoreOp::CreateUrlObject,
            StoreCall::CreateUrlObject {
                name: name.to_string(),
                urls: urls.to_vec(),
            },
        )
        .await
    }

    async fn apply_prompt(
        &self,
        output_name: &str,
        prompt: &str,
        input_name: &str,
    ) -> Result<StoreResponse, StoreError> {
        self.handle(
            StoreOp::ApplyPrompt,
            StoreCall::ApplyPrompt {
                output_name: output_name.to_string(),
                prompt: prompt.to_string(),
                input_name: input_name.to_string(),
            },
        )
        .await
    }

    async fn read_object(&self, name: &str) -> Result<StoreResponse, StoreError> {
        self.handle(
            StoreOp::ReadObject,
            StoreCall::ReadObject {
                name: name.to_string(),
            },
        )
        .await
    }

    async fn delete_object(&self, name: &str) -> Result<StoreResponse, StoreError> {
        self.handle(
            StoreOp::DeleteObject,
            StoreCall::DeleteObject {
                name: name.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
