// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bookkeeping of remote objects created by the current run

use crate::object::RemoteObjectRef;

/// Ordered set of remote objects awaiting deletion
///
/// Insertion order is creation order. Names are unique within a run; adding a
/// name that is already present is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectRegistry {
    objects: Vec<RemoteObjectRef>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created object. Returns false if the name was already tracked.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let object = RemoteObjectRef::new(name);
        if self.objects.contains(&object) {
            tracing::warn!(name = %object, "object already registered");
            return false;
        }
        self.objects.push(object);
        true
    }

    /// Forget every tracked object. Remote objects are left untouched.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Names in creation order
    pub fn list(&self) -> Vec<String> {
        self.objects.iter().map(|o| o.name.clone()).collect()
    }

    pub fn objects(&self) -> &[RemoteObjectRef] {
        &self.objects
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.iter().any(|o| o.name == name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
