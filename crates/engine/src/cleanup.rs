// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result of deleting created objects

use pagesum_adapters::StoreError;

/// What happened to one delete call
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionOutcome {
    pub name: String,
    /// None when the store acknowledged the delete
    pub error: Option<StoreError>,
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-object outcomes of a cleanup pass, in registry order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupReport {
    pub outcomes: Vec<DeletionOutcome>,
}

impl CleanupReport {
    pub fn all_deleted(&self) -> bool {
        self.outcomes.iter().all(DeletionOutcome::is_deleted)
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_deleted())
    }
}
