// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline state machine

mod stage;
mod state;

pub use stage::{Progress, Stage};
pub use state::{Phase, PipelineEvent, PipelineState, CLEANUP_CONFIRMATION, EMPTY_URL_MESSAGE, NO_SUMMARY};
