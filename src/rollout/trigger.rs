// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Forcing a rollout by rewriting the trigger annotation

use crate::constants::annotations;
use crate::error::Result;
use crate::kubernetes::replace_workload;
use crate::types::workload::{Workload, WorkloadKind};
use clockabilly::{Clockable, SecondsFormat, UtcClock};
use kube::Client;
use tracing::{info, instrument};

/// Which annotation to rewrite, and where its timestamps come from
pub struct TriggerSpec {
    key: String,
    clock: Box<dyn Clockable + Send + Sync>,
}

impl TriggerSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_clock(key, UtcClock::boxed())
    }

    pub fn with_clock(key: impl Into<String>, clock: Box<dyn Clockable + Send + Sync>) -> Self {
        Self {
            key: key.into(),
            clock,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current time as RFC 3339 in UTC, to the second
    pub fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Default for TriggerSpec {
    fn default() -> Self {
        Self::new(annotations::DEFAULT_TRIGGER)
    }
}

/// A workload whose rollout was triggered
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggeredWorkload {
    pub kind: WorkloadKind,
    pub name: String,
    pub timestamp: String,
}

/// Stamp the trigger annotation on the workload and its pod template.
///
/// One timestamp is taken and written to both places; it is returned.
pub fn stamp(workload: &mut Workload, spec: &TriggerSpec) -> Result<String> {
    let timestamp = spec.timestamp();
    workload.set_annotation_everywhere(spec.key(), &timestamp)?;
    Ok(timestamp)
}

/// Force a rollout of `workload` by stamping it and replacing the stored object
#[instrument(
    skip(client, workload, spec),
    fields(kind = %workload.kind(), name = %workload.name())
)]
pub async fn trigger(
    client: &Client,
    mut workload: Workload,
    spec: &TriggerSpec,
    dry_run: bool,
) -> Result<TriggeredWorkload> {
    let kind = workload.kind();
    let name = workload.name();

    let timestamp = stamp(&mut workload, spec)?;
    if dry_run {
        info!("Would trigger rolling update for {}/{} (dry run)", kind, name);
    } else {
        info!("Triggering rolling update for {}/{}", kind, name);
    }
    replace_workload(client, &workload, dry_run).await?;

    Ok(TriggeredWorkload {
        kind,
        name,
        timestamp,
    })
}
