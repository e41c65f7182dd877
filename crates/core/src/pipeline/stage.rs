// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline stages and the progress they report

use serde::{Deserialize, Serialize};

/// One of the three sequential remote operations of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ingest,
    Transform,
    Retrieve,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 3] = [Stage::Ingest, Stage::Transform, Stage::Retrieve];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Ingest => "ingest",
            Stage::Transform => "transform",
            Stage::Retrieve => "retrieve",
        }
    }

    /// Prefix of the failure message shown when this stage fails
    pub fn failure_action(&self) -> &'static str {
        match self {
            Stage::Ingest => "Failed to fetch webpage",
            Stage::Transform => "Failed to generate summary",
            Stage::Retrieve => "Failed to retrieve summary",
        }
    }

    /// Progress reached once this stage succeeds
    pub fn progress(&self) -> Progress {
        match self {
            Stage::Ingest => Progress::INGESTED,
            Stage::Transform => Progress::TRANSFORMED,
            Stage::Retrieve => Progress::DONE,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Run progress in percent. Only 0, 33, 66 and 100 are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const NONE: Progress = Progress(0);
    pub const INGESTED: Progress = Progress(33);
    pub const TRANSFORMED: Progress = Progress(66);
    pub const DONE: Progress = Progress(100);

    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
