// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire format of the remote object store
//!
//! Every call carries a JSON body (or none) and returns a JSON body. Failed
//! calls may include a `detail` string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data type tag for objects created from a list of URLs
pub const URL_DATA_TYPE: &str = "urls";
/// Input mode that folds all events of the input object into one prompt
pub const COMBINE_EVENTS: &str = "combine_events";

/// HTTP method of a store call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method and a path relative to the store's base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl Endpoint {
    pub fn ingest() -> Self {
        Self {
            method: HttpMethod::Post,
            path: "/input_data".to_string(),
        }
    }

    pub fn apply_prompt() -> Self {
        Self {
            method: HttpMethod::Post,
            path: "/apply_prompt".to_string(),
        }
    }

    pub fn read(name: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            path: format!("/return_data/{}", name),
        }
    }

    pub fn delete(name: &str) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: format!("/objects/{}", name),
        }
    }

    /// Join the path onto a base URL, tolerating a trailing slash on the base
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }
}

/// Body of the ingest call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRequest {
    pub created_object_name: String,
    pub data_type: String,
    pub input_data: Vec<String>,
}

impl IngestRequest {
    pub fn urls(name: &str, urls: &[String]) -> Self {
        Self {
            created_object_name: name.to_string(),
            data_type: URL_DATA_TYPE.to_string(),
            input_data: urls.to_vec(),
        }
    }
}

/// One input of a prompt application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptInput {
    pub input_object_name: String,
    pub mode: String,
}

/// Body of the transform call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPromptRequest {
    pub created_object_names: Vec<String>,
    pub prompt_string: String,
    pub inputs: Vec<PromptInput>,
}

impl ApplyPromptRequest {
    pub fn single(output_name: &str, prompt: &str, input_name: &str) -> Self {
        Self {
            created_object_names: vec![output_name.to_string()],
            prompt_string: prompt.to_string(),
            inputs: vec![PromptInput {
                input_object_name: input_name.to_string(),
                mode: COMBINE_EVENTS.to_string(),
            }],
        }
    }
}

/// `text_value` of a read response, if present and non-empty
///
/// Non-string scalars are rendered as JSON text.
pub fn text_value(body: &Value) -> Option<String> {
    match body.get("text_value")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// `detail` of a failed response, if present
///
/// Non-string details (validation error arrays) are rendered as compact JSON.
pub fn detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse a response body, keeping non-JSON text as a JSON string
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
