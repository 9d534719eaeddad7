// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::workload::WorkloadKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolloutError {
    #[error("Failed to load cluster credentials: {0}")]
    KubeconfigError(String),

    #[error("Failed to list {kind}s in namespace {namespace}: {source}")]
    ListError {
        kind: WorkloadKind,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to update {kind} {namespace}/{name}: {source}")]
    UpdateError {
        kind: WorkloadKind,
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("{kind} {name} has no {field}")]
    MissingField {
        kind: WorkloadKind,
        name: String,
        field: &'static str,
    },
}

impl RolloutError {
    /// HTTP status code of the underlying API error, if the API server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RolloutError::ListError { source, .. } | RolloutError::UpdateError { source, .. } => {
                match source {
                    kube::Error::Api(response) => Some(response.code),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RolloutError>;
