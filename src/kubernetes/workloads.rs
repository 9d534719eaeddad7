// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Listing and replacing Deployments, DaemonSets and StatefulSets

use crate::constants::FIELD_MANAGER;
use crate::error::{Result, RolloutError};
use crate::rollout::selector::Selector;
use crate::types::workload::{Workload, WorkloadKind};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use kube::api::{ListParams, PostParams};
use kube::{Api, Client};
use tracing::{debug, instrument};

/// List every workload of `kind` in `namespace`, in the order the API returns them
#[instrument(skip(client))]
pub async fn list_workloads(
    client: &Client,
    kind: WorkloadKind,
    namespace: &str,
) -> Result<Vec<Workload>> {
    let lp = ListParams::default();
    let listed: std::result::Result<Vec<Workload>, kube::Error> = match kind {
        WorkloadKind::Deployment => Api::<Deployment>::namespaced(client.clone(), namespace)
            .list(&lp)
            .await
            .map(|list| list.items.into_iter().map(Workload::from).collect()),
        WorkloadKind::DaemonSet => Api::<DaemonSet>::namespaced(client.clone(), namespace)
            .list(&lp)
            .await
            .map(|list| list.items.into_iter().map(Workload::from).collect()),
        WorkloadKind::StatefulSet => Api::<StatefulSet>::namespaced(client.clone(), namespace)
            .list(&lp)
            .await
            .map(|list| list.items.into_iter().map(Workload::from).collect()),
    };

    listed.map_err(|source| RolloutError::ListError {
        kind,
        namespace: namespace.to_string(),
        source,
    })
}

/// List the workloads of `kind` in `namespace` that the selector accepts
pub async fn list_matching(
    client: &Client,
    kind: WorkloadKind,
    namespace: &str,
    selector: &Selector,
) -> Result<Vec<Workload>> {
    let workloads = list_workloads(client, kind, namespace).await?;
    let total = workloads.len();

    let matching: Vec<Workload> = workloads
        .into_iter()
        .filter(|w| selector.matches(w))
        .collect();

    debug!(
        "{} of {} {}s in namespace {} match the selector",
        matching.len(),
        total,
        kind,
        namespace
    );

    Ok(matching)
}

/// Replace the stored object with `workload`.
///
/// This is a full overwrite; the object's `resourceVersion` is sent along so a
/// concurrent modification is rejected with a conflict.
pub async fn replace_workload(
    client: &Client,
    workload: &Workload,
    dry_run: bool,
) -> Result<Workload> {
    let kind = workload.kind();
    let name = workload.name();
    let namespace = workload
        .namespace()
        .ok_or_else(|| RolloutError::MissingField {
            kind,
            name: name.clone(),
            field: ".metadata.namespace",
        })?
        .to_string();

    let pp = PostParams {
        dry_run,
        field_manager: Some(FIELD_MANAGER.to_string()),
    };

    let replaced = match workload {
        Workload::Deployment(d) => Api::<Deployment>::namespaced(client.clone(), &namespace)
            .replace(&name, &pp, d)
            .await
            .map(Workload::from),
        Workload::DaemonSet(d) => Api::<DaemonSet>::namespaced(client.clone(), &namespace)
            .replace(&name, &pp, d)
            .await
            .map(Workload::from),
        Workload::StatefulSet(s) => Api::<StatefulSet>::namespaced(client.clone(), &namespace)
            .replace(&name, &pp, s)
            .await
            .map(Workload::from),
    };

    replaced.map_err(|source| RolloutError::UpdateError {
        kind,
        namespace,
        name,
        source,
    })
}
