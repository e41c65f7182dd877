// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use pagesum_core::{ApiLogEntry, CallOutcome, Phase, PipelineState};
use pagesum_engine::{CleanupReport, StateReceiver};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// One line of the cleanup summary
#[derive(Debug, Serialize)]
pub struct DeletionLine {
    pub name: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn deletion_lines(report: &CleanupReport) -> Vec<DeletionLine> {
    report
        .outcomes
        .iter()
        .map(|o| DeletionLine {
            name: o.name.clone(),
            deleted: o.is_deleted(),
            error: o.error.as_ref().map(ToString::to_string),
        })
        .collect()
}

/// Everything shown after a run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub url: String,
    pub state: PipelineState,
    pub created_objects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<ApiLogEntry>,
    #[serde(skip)]
    pub include_raw: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<Vec<DeletionLine>>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "URL: {}", self.url)?;
        writeln!(
            f,
            "Summary: {}",
            self.state.result_text.as_deref().unwrap_or("")
        )?;

        if self.include_raw {
            if let Some(raw) = &self.state.raw_data {
                writeln!(f, "\nRaw API Response:")?;
                writeln!(f, "{}", pretty(raw))?;
            }
        }

        if !self.calls.is_empty() {
            writeln!(f, "\nAPI Call Logs:")?;
            for entry in &self.calls {
                write!(f, "{}", format_entry(entry))?;
            }
        }

        if let Some(lines) = &self.cleanup {
            writeln!(f, "\nDeleted objects:")?;
            for line in lines {
                match &line.error {
                    None => writeln!(f, "  {} ok", line.name)?,
                    Some(e) => writeln!(f, "  {} failed: {}", line.name, e)?,
                }
            }
        }

        Ok(())
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}\n", line))
        .collect()
}

/// Render one logged call
pub fn format_entry(entry: &ApiLogEntry) -> String {
    let mut out = format!(
        "  {} {}  {}\n",
        entry.method,
        entry.endpoint,
        entry.timestamp.format("%H:%M:%S")
    );
    if let Some(request) = &entry.request {
        out.push_str("  Request:\n");
        out.push_str(&indent(&pretty(request)));
    }
    out.push_str("  Response:\n");
    let response = match &entry.response {
        CallOutcome::Responded { status, body } if body.is_null() => {
            serde_json::json!({ "status": status })
        }
        CallOutcome::Responded { body, .. } => body.clone(),
        CallOutcome::Failed { error } => serde_json::json!({ "error": error }),
    };
    out.push_str(&indent(&pretty(&response)));
    out
}

/// Progress line for a state snapshot, if it should be shown
pub fn format_progress(state: &PipelineState) -> Option<String> {
    match state.phase {
        Phase::Processing => Some(format!("[{:>3}%] processing", state.progress.percent())),
        Phase::Completed => Some(format!("[{:>3}%] completed", state.progress.percent())),
        Phase::Failed => Some(format!("[{:>3}%] failed", state.progress.percent())),
        Phase::Idle => None,
    }
}

/// Print progress to stderr until the orchestrator goes away
pub async fn print_progress(mut updates: StateReceiver) {
    let mut last = None;
    while let Some(state) = updates.recv().await {
        let Some(line) = format_progress(&state) else {
            continue;
        };
        if last.as_ref() != Some(&line) {
            eprintln!("{}", line);
            last = Some(line);
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
