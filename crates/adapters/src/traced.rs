// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::store::{ObjectStore, StoreError, StoreResponse};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any ObjectStore
#[derive(Clone)]
pub struct TracedObjectStore<S> {
    inner: S,
}

impl<S> TracedObjectStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

fn report(result: &Result<StoreResponse, StoreError>, elapsed: std::time::Duration) {
    let elapsed_ms = elapsed.as_millis() as u64;
    match result {
        Ok(response) => tracing::info!(status = response.status, elapsed_ms, "completed"),
        Err(StoreError::Remote { status, detail, .. }) => tracing::error!(
            status,
            detail = detail.as_deref().unwrap_or(""),
            elapsed_ms,
            "store rejected call"
        ),
        Err(e) => tracing::error!(error = %e, elapsed_ms, "call failed"),
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for TracedObjectStore<S> {
    async fn create_url_object(
        &self,
        name: &str,
        urls: &[String],
    ) -> Result<StoreResponse, StoreError> {
        let span = tracing::info_span!("store.create_url_object", name, url_count = urls.len());
        async {
            tracing::info!("creating object");
            let start = std::time::Instant::now();
            let result = self.inner.create_url_object(name, urls).await;
            report(&result, start.elapsed());
            result
        }
        .instrument(span)
        .await
    }

    async fn apply_prompt(
        &self,
        output_name: &str,
        prompt: &str,
        input_name: &str,
    ) -> Result<StoreResponse, StoreError> {
        let span = tracing::info_span!("store.apply_prompt", output_name, input_name);
        async {
            tracing::debug!(prompt_len = prompt.len(), "applying prompt");
            let start = std::time::Instant::now();
            let result = self.inner.apply_prompt(output_name, prompt, input_name).await;
            report(&result, start.elapsed());
            result
        }
        .instrument(span)
        .await
    }

    async fn read_object(&self, name: &str) -> Result<StoreResponse, StoreError> {
        let span = tracing::info_span!("store.read_object", name);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.read_object(name).await;
            report(&result, start.elapsed());
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_object(&self, name: &str) -> Result<StoreResponse, StoreError> {
        let span = tracing::info_span!("store.delete_object", name);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.delete_object(name).await;
            // delete failing is tolerated by cleanup
            match &result {
                Ok(_) => tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "deleted"),
                Err(e) => tracing::warn!(error = %e, "delete failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
