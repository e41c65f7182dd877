// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the pipeline orchestrator

use pagesum_adapters::StoreError;
use pagesum_core::Stage;
use thiserror::Error;

/// Errors that can occur driving the pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected locally before any network call
    #[error("{0}")]
    Validation(String),
    #[error("a pipeline run is already in progress")]
    AlreadyRunning,
    #[error("pipeline is busy: {0}")]
    Busy(&'static str),
    /// The run was cancelled or reset while a call was in flight
    #[error("run was cancelled")]
    Cancelled,
    /// A stage failed; `message` is the text shown to the user
    #[error("{message}")]
    Stage {
        stage: Stage,
        message: String,
        #[source]
        source: StoreError,
    },
}
