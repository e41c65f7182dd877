// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration for reaching the remote object store
//!
//! Layers, lowest first: built-in defaults, an optional TOML file, then
//! `PAGESUM_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Base URL of the hosted store
pub const DEFAULT_BASE_URL: &str = "https://builder.impromptu-labs.com/api_tools";

/// Placeholder in the prompt template replaced by `{<input object name>}`
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Instruction applied to the ingested page
pub const DEFAULT_PROMPT: &str =
    "Provide a single, clear sentence that summarizes the main content and purpose of this webpage: {input}";

pub const ENV_BASE_URL: &str = "PAGESUM_BASE_URL";
pub const ENV_TOKEN: &str = "PAGESUM_TOKEN";
pub const ENV_TIMEOUT_MS: &str = "PAGESUM_TIMEOUT_MS";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
    #[error("prompt template must contain {{input}}")]
    MissingPlaceholder,
}

/// Store connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Static bearer token; the Authorization header is omitted when unset
    pub token: Option<String>,
    /// Per-call timeout. None waits indefinitely.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// Suffix object names with a per-run tag
    pub scope_object_names: bool,
    /// Transform instruction, must contain `{input}`
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: None,
            scope_object_names: false,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("scope_object_names", &self.scope_object_names)
            .field("prompt", &self.prompt)
            .finish()
    }
}

impl Config {
    /// Default location: `<config dir>/pagesum/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pagesum").join("config.toml"))
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the default location if it exists
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (Some(p.to_path_buf()), true),
            None => (Self::default_path(), false),
        };

        let config = match path {
            Some(path) if required || path.exists() => {
                let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Self::from_toml(&text, &path)?
            }
            _ => Self::default(),
        };

        config.with_env(|var| std::env::var(var).ok())
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS).filter(|v| !v.is_empty()) {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::Env {
                var: ENV_TIMEOUT_MS,
                value: ms.clone(),
            })?;
            self.timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.prompt.contains(INPUT_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder);
        }
        Ok(())
    }

    /// Prompt string sent to the store, referencing `input_name`
    pub fn render_prompt(&self, input_name: &str) -> String {
        self.prompt
            .replace(INPUT_PLACEHOLDER, &format!("{{{}}}", input_name))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
