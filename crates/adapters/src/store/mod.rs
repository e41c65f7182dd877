// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote object store adapters

mod http;

pub use http::HttpObjectStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeObjectStore, StoreCall, StoreOp};

use async_trait::async_trait;
use pagesum_core::wire;
use pagesum_core::CallOutcome;
use serde_json::Value;
use thiserror::Error;

/// A 2xx response from the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: Value,
}

impl StoreResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// Errors from store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store answered with a non-2xx status
    #[error("{} - {}", .status, .detail.as_deref().unwrap_or("Unknown error"))]
    Remote {
        status: u16,
        detail: Option<String>,
        body: Value,
    },
    /// The request did not complete
    #[error("{0}")]
    Transport(String),
    /// The request body could not be encoded
    #[error("invalid request payload: {0}")]
    Payload(String),
}

impl StoreError {
    /// Build a remote error from a non-2xx response body
    pub fn from_response(status: u16, body: Value) -> Self {
        StoreError::Remote {
            status,
            detail: wire::detail(&body),
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// How a call result is recorded in the API call log
pub fn outcome(result: &Result<StoreResponse, StoreError>) -> CallOutcome {
    match result {
        Ok(response) => CallOutcome::Responded {
            status: response.status,
            body: response.body.clone(),
        },
        Err(StoreError::Remote { status, body, .. }) => CallOutcome::Responded {
            status: *status,
            body: body.clone(),
        },
        Err(e) => CallOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Adapter for the remote object store
///
/// Each method is one network round trip; nothing is retried.
#[async_trait]
pub trait ObjectStore: Clone + Send + Sync + 'static {
    /// Create an object of data type `urls` from the given URLs
    async fn create_url_object(
        &self,
        name: &str,
        urls: &[String],
    ) -> Result<StoreResponse, StoreError>;

    /// Apply a prompt to `input_name`, producing `output_name`
    async fn apply_prompt(
        &self,
        output_name: &str,
        prompt: &str,
        input_name: &str,
    ) -> Result<StoreResponse, StoreError>;

    /// Read an object's value
    async fn read_object(&self, name: &str) -> Result<StoreResponse, StoreError>;

    /// Delete an object
    async fn delete_object(&self, name: &str) -> Result<StoreResponse, StoreError>;
}
