// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP object store adapter
//!
//! Uses a blocking `ureq` agent on tokio's blocking pool. Non-2xx statuses are
//! returned as responses so the `detail` body can be read.

use super::{ObjectStore, StoreError, StoreResponse};
use async_trait::async_trait;
use pagesum_core::wire::{self, ApplyPromptRequest, Endpoint, HttpMethod, IngestRequest};
use pagesum_core::Config;
use serde::Serialize;

/// Object store reached over HTTPS with a static bearer token
#[derive(Clone)]
pub struct HttpObjectStore {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(config: &Config) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(
        &self,
        endpoint: Endpoint,
        payload: Option<String>,
    ) -> Result<StoreResponse, StoreError> {
        let agent = self.agent.clone();
        let url = endpoint.url(&self.base_url);
        let auth = self.token.as_ref().map(|t| format!("Bearer {}", t));
        let method = endpoint.method;

        let (status, text) = tokio::task::spawn_blocking(move || {
            send(&agent, method, &url, auth.as_deref(), payload.as_deref())
        })
        .await
        .map_err(|e| StoreError::Transport(format!("request task failed: {}", e)))??;

        let body = wire::parse_body(&text);
        if (200..300).contains(&status) {
            Ok(StoreResponse { status, body })
        } else {
            Err(StoreError::from_response(status, body))
        }
    }
}

fn encode(payload: &impl Serialize) -> Result<String, StoreError> {
    serde_json::to_string(payload).map_err(|e| StoreError::Payload(e.to_string()))
}

fn with_headers<B>(
    request: ureq::RequestBuilder<B>,
    auth: Option<&str>,
) -> ureq::RequestBuilder<B> {
    let request = request.header("Content-Type", "application/json");
    match auth {
        Some(value) => request.header("Authorization", value),
        None => request,
    }
}

/// Issue one request and return the status and raw body text
fn send(
    agent: &ureq::Agent,
    method: HttpMethod,
    url: &str,
    auth: Option<&str>,
    payload: Option<&str>,
) -> Result<(u16, String), StoreError> {
    let result = match method {
        HttpMethod::Get => with_headers(agent.get(url), auth).call(),
        HttpMethod::Delete => with_headers(agent.delete(url), auth).call(),
        HttpMethod::Post => {
            let request = with_headers(agent.post(url), auth);
            match payload {
                Some(body) => request.send(body.as_bytes()),
                None => request.send_empty(),
            }
        }
    };

    let mut response = result.map_err(|e| StoreError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| StoreError::Transport(format!("failed to read response: {}", e)))?;

    Ok((status, text))
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn create_url_object(
        &self,
        name: &str,
        urls: &[String],
    ) -> Result<StoreResponse, StoreError> {
        let payload = encode(&IngestRequest::urls(name, urls))?;
        self.execute(Endpoint::ingest(), Some(payload)).await
    }

    async fn apply_prompt(
        &self,
        output_name: &str,
        prompt: &str,
        input_name: &str,
    ) -> Result<StoreResponse, StoreError> {
        let payload = encode(&ApplyPromptRequest::single(output_name, prompt, input_name))?;
        self.execute(Endpoint::apply_prompt(), Some(payload)).await
    }

    async fn read_object(&self, name: &str) -> Result<StoreResponse, StoreError> {
        self.execute(Endpoint::read(name), None).await
    }

    async fn delete_object(&self, name: &str) -> Result<StoreResponse, StoreError> {
        self.execute(Endpoint::delete(name), None).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
