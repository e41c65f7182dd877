// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline state machine
//!
//! `PipelineState` is the only state the presentation layer observes. It is
//! changed exclusively through `transition`, which is pure.

use super::stage::{Progress, Stage};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result text when the retrieve response has no `text_value`
pub const NO_SUMMARY: &str = "No summary generated";
/// Error message when `start` is given a blank URL
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL";
/// Result text after a cleanup pass
pub const CLEANUP_CONFIRMATION: &str = "Objects deleted successfully";

/// Visible phase of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Processing,
    Completed,
    Failed,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Processing => "processing",
            Phase::Completed => "completed",
            Phase::Failed => "failed",
        }
    }

    /// Check if this phase ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Events that can change pipeline state
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// `start` was called with a blank URL; back to the input step
    InputRejected,
    /// A run began
    Started,
    /// Ingest or transform returned 2xx
    StageCompleted { stage: Stage },
    /// Retrieve returned 2xx with this body
    Retrieved { body: Value },
    /// A stage failed; `message` is already formatted
    StageFailed { stage: Stage, message: String },
    /// The user abandoned the run
    Cancelled,
    /// Back to defaults
    Reset,
    /// Delete calls were issued for every registered object
    CleanupFinished,
}

/// State of the one pipeline instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub phase: Phase,
    pub progress: Progress,
    pub result_text: Option<String>,
    pub error_message: Option<String>,
    /// Full body of the successful retrieve call
    pub raw_data: Option<Value>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step of the three-step flow the presentation shows: input, processing, result
    pub fn step(&self) -> u8 {
        match self.phase {
            Phase::Idle => 1,
            Phase::Processing => 2,
            Phase::Completed | Phase::Failed => 3,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Processing
    }

    /// Pure transition function
    ///
    /// Stage events only apply while processing; anything arriving after a
    /// cancel or reset leaves the state untouched.
    pub fn transition(&self, event: &PipelineEvent) -> PipelineState {
        match (self.phase, event) {
            (_, PipelineEvent::InputRejected) => PipelineState {
                error_message: Some(EMPTY_URL_MESSAGE.to_string()),
                result_text: Some(EMPTY_URL_MESSAGE.to_string()),
                ..PipelineState::default()
            },

            (Phase::Processing, PipelineEvent::Started) => self.clone(),
            (_, PipelineEvent::Started) => PipelineState {
                phase: Phase::Processing,
                ..PipelineState::default()
            },

            (Phase::Processing, PipelineEvent::StageCompleted { stage }) => PipelineState {
                progress: self.progress.max(stage.progress()),
                ..self.clone()
            },

            (Phase::Processing, PipelineEvent::Retrieved { body }) => {
                let text =
                    crate::wire::text_value(body).unwrap_or_else(|| NO_SUMMARY.to_string());
                PipelineState {
                    phase: Phase::Completed,
                    progress: Progress::DONE,
                    result_text: Some(text),
                    error_message: None,
                    raw_data: Some(body.clone()),
                }
            }

            (Phase::Processing, PipelineEvent::StageFailed { message, .. }) => PipelineState {
                phase: Phase::Failed,
                result_text: Some(format!("Error: {}", message)),
                error_message: Some(message.clone()),
                ..self.clone()
            },

            (_, PipelineEvent::Cancelled) => PipelineState {
                phase: Phase::Idle,
                progress: Progress::NONE,
                ..self.clone()
            },

            (_, PipelineEvent::Reset) => PipelineState::default(),

            (_, PipelineEvent::CleanupFinished) => PipelineState {
                result_text: Some(CLEANUP_CONFIRMATION.to_string()),
                ..self.clone()
            },

            // Stage events outside a run are stale
            (_, PipelineEvent::StageCompleted { .. })
            | (_, PipelineEvent::Retrieved { .. })
            | (_, PipelineEvent::StageFailed { .. }) => self.clone(),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
