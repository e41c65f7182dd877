// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pagesum-core: domain model for the page summarizer
//!
//! This crate provides:
//! - The pure `PipelineState` state machine driven by the orchestrator
//! - Bookkeeping for created remote objects and the API call log
//! - Wire payloads and endpoints of the remote object store
//! - Layered configuration

pub mod clock;
pub mod id;

pub mod call_log;
pub mod config;
pub mod object;
pub mod pipeline;
pub mod registry;
pub mod wire;

// Re-exports
pub use call_log::{ApiCallLog, ApiLogEntry, CallOutcome};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Config, ConfigError};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use object::{ObjectNames, RemoteObjectRef};
pub use pipeline::{Phase, PipelineEvent, PipelineState, Progress, Stage};
pub use registry::ObjectRegistry;
pub use wire::{ApplyPromptRequest, Endpoint, HttpMethod, IngestRequest, PromptInput};
