// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs the list, select and trigger cycle across kinds and namespaces.

use crate::constants::run::DEFAULT_CONCURRENCY;
use crate::error::RolloutError;
use crate::kubernetes::list_matching;
use crate::rollout::selector::Selector;
use crate::rollout::trigger::{trigger, TriggerSpec, TriggeredWorkload};
use crate::types::workload::WorkloadKind;
use futures::stream::{self, StreamExt};
use kube::Client;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Why processing of a namespace stopped
#[derive(Error, Debug)]
#[error("rollout of {kind}s failed: {source}")]
pub struct NamespaceFailure {
    pub kind: WorkloadKind,
    #[source]
    pub source: RolloutError,
}

/// Outcome of processing one namespace
#[derive(Debug)]
pub struct NamespaceResult {
    pub namespace: String,
    pub outcome: std::result::Result<Vec<TriggeredWorkload>, NamespaceFailure>,
}

impl NamespaceResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub struct Orchestrator {
    client: Client,
    selector: Selector,
    trigger: TriggerSpec,
    dry_run: bool,
    concurrency: usize,
}

impl Orchestrator {
    pub fn new(client: Client, selector: Selector, trigger: TriggerSpec) -> Self {
        Self {
            client,
            selector,
            trigger,
            dry_run: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Submit every replace with server-side dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process up to `concurrency` namespaces at the same time (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Trigger every selected workload in `namespace`, Deployments first, then
    /// DaemonSets, then StatefulSets.
    ///
    /// The first list or update error stops the namespace: later workloads of the
    /// same kind and all later kinds are left alone.
    #[instrument(skip(self))]
    pub async fn process_namespace(
        &self,
        namespace: &str,
    ) -> std::result::Result<Vec<TriggeredWorkload>, NamespaceFailure> {
        info!("Processing namespace {}", namespace);
        let mut triggered = Vec::new();

        for kind in WorkloadKind::ALL {
            let workloads = list_matching(&self.client, kind, namespace, &self.selector)
                .await
                .map_err(|source| NamespaceFailure { kind, source })?;

            for workload in workloads {
                let done = trigger(&self.client, workload, &self.trigger, self.dry_run)
                    .await
                    .map_err(|source| NamespaceFailure { kind, source })?;
                triggered.push(done);
            }
        }

        Ok(triggered)
    }

    /// Process every namespace and report one result per namespace, in request order.
    ///
    /// A failed namespace is logged and recorded; the remaining namespaces are
    /// still processed.
    pub async fn run_all(&self, namespaces: &[String]) -> Vec<NamespaceResult> {
        stream::iter(namespaces)
            .map(|namespace| async move {
                let outcome = self.process_namespace(namespace).await;
                if let Err(e) = &outcome {
                    error!("Failed rollout in namespace {}: {}", namespace, e);
                }
                NamespaceResult {
                    namespace: namespace.clone(),
                    outcome,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

/// Totals over a whole run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub triggered: usize,
}

impl RunSummary {
    pub fn from_results(results: &[NamespaceResult]) -> Self {
        results
            .iter()
            .fold(RunSummary::default(), |mut summary, result| {
                match &result.outcome {
                    Ok(triggered) => {
                        summary.succeeded += 1;
                        summary.triggered += triggered.len();
                    }
                    Err(_) => summary.failed += 1,
                }
                summary
            })
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
