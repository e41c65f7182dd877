// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Summarize command: one pipeline run from the terminal

use crate::output::{self, OutputFormat, RunReport};
use anyhow::Result;
use clap::Args;
use pagesum_adapters::{HttpObjectStore, TracedObjectStore};
use pagesum_core::{Config, Phase};
use pagesum_engine::{EngineError, PipelineOrchestrator};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status after Ctrl-C
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Args)]
pub struct SummarizeArgs {
    /// Page to summarize
    pub url: String,

    /// Delete the created remote objects afterwards
    #[arg(long)]
    pub cleanup: bool,

    /// Print every API call made
    #[arg(long)]
    pub show_log: bool,

    /// Print the raw retrieve response
    #[arg(long)]
    pub raw: bool,

    /// Export the API call log as JSON Lines
    #[arg(long, value_name = "PATH")]
    pub log_json: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn summarize(args: SummarizeArgs, config: Config) -> Result<ExitCode> {
    let store = TracedObjectStore::new(HttpObjectStore::new(&config));
    let orchestrator = PipelineOrchestrator::with_defaults(store, config);

    let progress = tokio::spawn(output::print_progress(orchestrator.subscribe()));

    let result = tokio::select! {
        result = orchestrator.start(&args.url) => result,
        _ = tokio::signal::ctrl_c() => {
            orchestrator.cancel();
            Err(EngineError::Cancelled)
        }
    };

    match result {
        Ok(_) => {}
        Err(EngineError::Cancelled) => {
            eprintln!("Cancelled");
            return Ok(ExitCode::from(EXIT_INTERRUPTED));
        }
        Err(e) => return Err(e.into()),
    }

    let cleanup = if args.cleanup {
        let report = orchestrator.delete_created_objects().await?;
        Some(output::deletion_lines(&report))
    } else {
        None
    };

    if let Some(path) = &args.log_json {
        orchestrator.export_log(path)?;
    }

    let state = orchestrator.state();
    let report = RunReport {
        url: orchestrator.url(),
        state,
        created_objects: orchestrator.created_objects(),
        calls: if args.show_log {
            orchestrator.log_entries()
        } else {
            Vec::new()
        },
        include_raw: args.raw,
        cleanup,
    };

    drop(orchestrator);
    // Sender side is gone; the printer drains and exits
    if let Err(e) = progress.await {
        tracing::warn!(error = %e, "progress printer failed");
    }

    output::print(&report, args.format);

    Ok(if report.state.phase == Phase::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
