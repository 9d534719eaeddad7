// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Annotation based workload selection

use crate::types::workload::Workload;
use std::collections::BTreeMap;

/// Selects workloads by an object-level annotation.
///
/// An empty key selects every workload. With a key, the annotation must be
/// present, and if a value is given it must be equal to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    key: String,
    value: String,
}

impl Selector {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A selector accepting every workload
    pub fn all() -> Self {
        Self::default()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, workload: &Workload) -> bool {
        self.matches_annotations(workload.annotations())
    }

    /// Check an annotation map; `None` counts as no annotations at all
    pub fn matches_annotations(&self, annotations: Option<&BTreeMap<String, String>>) -> bool {
        if self.key.is_empty() {
            return true;
        }

        annotations
            .and_then(|a| a.get(&self.key))
            .is_some_and(|v| self.value.is_empty() || *v == self.value)
    }
}
