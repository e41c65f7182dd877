// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline orchestrator
//!
//! Sequences ingest, transform and retrieve against the object store. Each
//! stage consumes the object the previous one created, so stages never
//! overlap. All mutable state lives behind one mutex that is never held
//! across an await.
//!
//! Cancel is not preemptive: the in-flight call runs to completion and the
//! detached run keeps issuing its remaining stages. Those late results are
//! still appended to the call log and registry but no longer touch the
//! visible `PipelineState`.
//!
//! A failed stage ends the run in `Phase::Failed`, never in
//! `Phase::Completed` with an error set. Consumers that route on the result
//! view should use `PipelineState::step()`, which is 3 for both.

use crate::cleanup::{CleanupReport, DeletionOutcome};
use crate::error::EngineError;
use pagesum_adapters::{outcome, ObjectStore, StoreError, StoreResponse};
use pagesum_core::pipeline::EMPTY_URL_MESSAGE;
use pagesum_core::{
    ApiCallLog, ApiLogEntry, ApplyPromptRequest, Clock, Config, Endpoint, IdGen, IngestRequest,
    ObjectNames, ObjectRegistry, PipelineEvent, PipelineState, Stage, SystemClock, UuidIdGen,
};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// Receiver of state snapshots, one per state change
pub type StateReceiver = mpsc::UnboundedReceiver<PipelineState>;

struct Shared<C, I> {
    state: PipelineState,
    url: String,
    log: ApiCallLog<C, I>,
    registry: ObjectRegistry,
    /// Bumped by every start, cancel and reset; a run only updates visible
    /// state while its generation is current
    generation: u64,
    cleaning: bool,
    subscribers: Vec<mpsc::UnboundedSender<PipelineState>>,
}

impl<C: Clock, I: IdGen> Shared<C, I> {
    fn apply(&mut self, event: PipelineEvent) {
        let next = self.state.transition(&event);
        if next == self.state {
            return;
        }
        self.state = next;
        let snapshot = &self.state;
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

/// Drives one pipeline at a time and owns all of its state
pub struct PipelineOrchestrator<S, C = SystemClock, I = UuidIdGen> {
    store: S,
    config: Config,
    ids: I,
    shared: Arc<Mutex<Shared<C, I>>>,
}

impl<S: ObjectStore> PipelineOrchestrator<S> {
    /// Orchestrator with the system clock and UUID log ids
    pub fn with_defaults(store: S, config: Config) -> Self {
        Self::new(store, config, SystemClock, UuidIdGen)
    }
}

impl<S, C, I> PipelineOrchestrator<S, C, I>
where
    S: ObjectStore,
    C: Clock,
    I: IdGen,
{
    pub fn new(store: S, config: Config, clock: C, ids: I) -> Self {
        let shared = Shared {
            state: PipelineState::new(),
            url: String::new(),
            log: ApiCallLog::new(clock, ids.clone()),
            registry: ObjectRegistry::new(),
            generation: 0,
            cleaning: false,
            subscribers: Vec::new(),
        };
        Self {
            store,
            config,
            ids,
            shared: Arc::new(Mutex::new(shared)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<C, I>> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Snapshot of the visible state
    pub fn state(&self) -> PipelineState {
        self.lock().state.clone()
    }

    /// URL of the current run, empty after reset
    pub fn url(&self) -> String {
        self.lock().url.clone()
    }

    /// Logged calls, oldest first
    pub fn log_entries(&self) -> Vec<ApiLogEntry> {
        self.lock().log.entries().to_vec()
    }

    /// Names of remote objects awaiting deletion, in creation order
    pub fn created_objects(&self) -> Vec<String> {
        self.lock().registry.list()
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> StateReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Write the call log as JSON Lines
    pub fn export_log(&self, path: &Path) -> std::io::Result<()> {
        self.lock().log.export(path)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Run the three stages for `url`
    ///
    /// Returns the terminal state. A stage failure is not an `Err`: it ends
    /// the run in `Phase::Failed` with the message in `result_text`.
    pub async fn start(&self, url: &str) -> Result<PipelineState, EngineError> {
        let (generation, names) = {
            let mut shared = self.lock();
            if shared.state.is_processing() {
                tracing::warn!("start rejected, run in progress");
                return Err(EngineError::AlreadyRunning);
            }
            if shared.cleaning {
                return Err(EngineError::Busy("deleting created objects"));
            }

            shared.url = url.to_string();
            if url.trim().is_empty() {
                shared.apply(PipelineEvent::InputRejected);
                return Err(EngineError::Validation(EMPTY_URL_MESSAGE.to_string()));
            }

            shared.generation += 1;
            shared.log.clear();
            shared.registry.clear();
            shared.apply(PipelineEvent::Started);
            (shared.generation, self.object_names())
        };

        tracing::info!(url, generation, content = %names.content, "pipeline started");

        match self.run_stages(generation, url, &names).await {
            Ok(()) => tracing::info!(generation, "pipeline completed"),
            Err(e) => tracing::error!(generation, error = %e, "pipeline failed"),
        }

        let shared = self.lock();
        if shared.generation != generation {
            tracing::warn!(generation, "run finished after cancel");
            return Err(EngineError::Cancelled);
        }
        Ok(shared.state.clone())
    }

    fn object_names(&self) -> ObjectNames {
        if self.config.scope_object_names {
            ObjectNames::scoped(&self.ids.next_tag())
        } else {
            ObjectNames::fixed()
        }
    }

    async fn run_stages(
        &self,
        generation: u64,
        url: &str,
        names: &ObjectNames,
    ) -> Result<(), EngineError> {
        let urls = vec![url.to_string()];
        let request = IngestRequest::urls(&names.content, &urls);
        let result = self.store.create_url_object(&names.content, &urls).await;
        self.finish_stage(
            generation,
            Stage::Ingest,
            Endpoint::ingest(),
            to_value(&request),
            result,
            Some(&names.content),
        )?;

        let prompt = self.config.render_prompt(&names.content);
        let request = ApplyPromptRequest::single(&names.summary, &prompt, &names.content);
        let result = self
            .store
            .apply_prompt(&names.summary, &prompt, &names.content)
            .await;
        self.finish_stage(
            generation,
            Stage::Transform,
            Endpoint::apply_prompt(),
            to_value(&request),
            result,
            Some(&names.summary),
        )?;

        let result = self.store.read_object(&names.summary).await;
        self.finish_stage(
            generation,
            Stage::Retrieve,
            Endpoint::read(&names.summary),
            None,
            result,
            None,
        )?;

        Ok(())
    }

    /// Log a stage's call, register what it created and advance the state
    fn finish_stage(
        &self,
        generation: u64,
        stage: Stage,
        endpoint: Endpoint,
        request: Option<Value>,
        result: Result<StoreResponse, StoreError>,
        created: Option<&str>,
    ) -> Result<StoreResponse, EngineError> {
        let mut shared = self.lock();
        shared
            .log
            .record(endpoint.method, endpoint.path, request, outcome(&result));
        let current = shared.generation == generation;

        match result {
            Ok(response) => {
                if let Some(name) = created {
                    shared.registry.add(name);
                }
                if current {
                    let event = match stage {
                        Stage::Retrieve => PipelineEvent::Retrieved {
                            body: response.body.clone(),
                        },
                        _ => PipelineEvent::StageCompleted { stage },
                    };
                    shared.apply(event);
                }
                tracing::info!(%stage, status = response.status, current, "stage complete");
                Ok(response)
            }
            Err(source) => {
                let message = format!("{}: {}", stage.failure_action(), source);
                if current {
                    shared.apply(PipelineEvent::StageFailed {
                        stage,
                        message: message.clone(),
                    });
                }
                Err(EngineError::Stage {
                    stage,
                    message,
                    source,
                })
            }
        }
    }

    /// Return to the input step. Outstanding calls are not aborted.
    pub fn cancel(&self) {
        let mut shared = self.lock();
        if shared.state.is_processing() {
            tracing::info!(generation = shared.generation, "run cancelled");
        }
        shared.generation += 1;
        shared.apply(PipelineEvent::Cancelled);
    }

    /// Restore initial state and forget the log and created objects
    ///
    /// Remote objects are not deleted.
    pub fn reset(&self) {
        let mut shared = self.lock();
        shared.generation += 1;
        shared.url.clear();
        shared.log.clear();
        shared.registry.clear();
        shared.apply(PipelineEvent::Reset);
        tracing::debug!("pipeline reset");
    }

    /// Delete every registered object, best effort
    ///
    /// Each delete is logged and a failure does not stop the rest. The
    /// registry is cleared once all deletes were attempted. A cancel or reset
    /// during cleanup detaches it: remaining deletes are still issued but
    /// neither logged nor reflected in the state.
    pub async fn delete_created_objects(&self) -> Result<CleanupReport, EngineError> {
        let (generation, names) = {
            let mut shared = self.lock();
            if shared.state.is_processing() {
                return Err(EngineError::Busy("run in progress"));
            }
            if shared.cleaning {
                return Err(EngineError::Busy("deleting created objects"));
            }
            shared.cleaning = true;
            (shared.generation, shared.registry.list())
        };
        let _cleaning = CleaningFlag(&self.shared);

        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let result = self.store.delete_object(&name).await;
            let endpoint = Endpoint::delete(&name);
            {
                let mut shared = self.lock();
                if shared.generation == generation {
                    shared
                        .log
                        .record(endpoint.method, endpoint.path, None, outcome(&result));
                }
            }

            if let Err(e) = &result {
                tracing::warn!(name = %name, error = %e, "delete failed");
            }
            outcomes.push(DeletionOutcome {
                name,
                error: result.err(),
            });
        }

        let report = CleanupReport { outcomes };
        let mut shared = self.lock();
        if shared.generation != generation {
            tracing::warn!(generation, "cleanup finished after cancel or reset");
            return Ok(report);
        }
        shared.registry.clear();
        shared.apply(PipelineEvent::CleanupFinished);
        tracing::info!(
            attempted = report.outcomes.len(),
            failed = report.failures().count(),
            "cleanup finished"
        );

        Ok(report)
    }
}

/// Clears the cleanup flag even if the cleanup future is dropped
struct CleaningFlag<'a, C, I>(&'a Mutex<Shared<C, I>>);

impl<C, I> Drop for CleaningFlag<'_, C, I> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).cleaning = false;
    }
}

fn to_value(request: &impl serde::Serialize) -> Option<Value> {
    serde_json::to_value(request).ok()
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
