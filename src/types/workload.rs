// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{Result, RolloutError};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::api::ObjectMeta;
use kube::{Resource, ResourceExt};
use std::collections::BTreeMap;
use std::fmt;

/// The workload kinds whose pod templates can be rolled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    DaemonSet,
    StatefulSet,
}

impl WorkloadKind {
    /// Every kind, in the order a namespace is processed
    pub const ALL: [WorkloadKind; 3] = [
        WorkloadKind::Deployment,
        WorkloadKind::DaemonSet,
        WorkloadKind::StatefulSet,
    ];

    /// Lowercase plural resource name, as used in API paths
    pub fn plural(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployments",
            WorkloadKind::DaemonSet => "daemonsets",
            WorkloadKind::StatefulSet => "statefulsets",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::DaemonSet => "DaemonSet",
            WorkloadKind::StatefulSet => "StatefulSet",
        };
        f.write_str(name)
    }
}

/// A listed workload, owned for the duration of one trigger cycle.
///
/// The full object returned by the API server is kept so that a replace
/// carries every field (including `resourceVersion`) forward unchanged.
#[derive(Clone, Debug)]
pub enum Workload {
    Deployment(Deployment),
    DaemonSet(DaemonSet),
    StatefulSet(StatefulSet),
}

impl Workload {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            Workload::Deployment(_) => WorkloadKind::Deployment,
            Workload::DaemonSet(_) => WorkloadKind::DaemonSet,
            Workload::StatefulSet(_) => WorkloadKind::StatefulSet,
        }
    }

    pub fn meta(&self) -> &ObjectMeta {
        match self {
            Workload::Deployment(d) => d.meta(),
            Workload::DaemonSet(d) => d.meta(),
            Workload::StatefulSet(s) => s.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Workload::Deployment(d) => d.meta_mut(),
            Workload::DaemonSet(d) => d.meta_mut(),
            Workload::StatefulSet(s) => s.meta_mut(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Workload::Deployment(d) => d.name_any(),
            Workload::DaemonSet(d) => d.name_any(),
            Workload::StatefulSet(s) => s.name_any(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.meta().namespace.as_deref()
    }

    /// Object-level annotations, `None` when the object has none
    pub fn annotations(&self) -> Option<&BTreeMap<String, String>> {
        self.meta().annotations.as_ref()
    }

    /// Pod template annotations, `None` when the template (or its metadata) has none
    pub fn template_annotations(&self) -> Option<&BTreeMap<String, String>> {
        self.template()
            .and_then(|t| t.metadata.as_ref())
            .and_then(|m| m.annotations.as_ref())
    }

    fn template(&self) -> Option<&PodTemplateSpec> {
        match self {
            Workload::Deployment(d) => d.spec.as_ref().map(|s| &s.template),
            Workload::DaemonSet(d) => d.spec.as_ref().map(|s| &s.template),
            Workload::StatefulSet(s) => s.spec.as_ref().map(|s| &s.template),
        }
    }

    fn template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        match self {
            Workload::Deployment(d) => d.spec.as_mut().map(|s| &mut s.template),
            Workload::DaemonSet(d) => d.spec.as_mut().map(|s| &mut s.template),
            Workload::StatefulSet(s) => s.spec.as_mut().map(|s| &mut s.template),
        }
    }

    /// Write `key = value` to both the object and the pod template annotations,
    /// creating either map when it is absent.
    ///
    /// The object is left untouched if it has no spec to carry a pod template.
    pub fn set_annotation_everywhere(&mut self, key: &str, value: &str) -> Result<()> {
        let kind = self.kind();
        let name = self.name();

        let template = self.template_mut().ok_or(RolloutError::MissingField {
            kind,
            name,
            field: ".spec.template",
        })?;
        template
            .metadata
            .get_or_insert_with(ObjectMeta::default)
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());

        self.meta_mut()
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());

        Ok(())
    }
}

impl From<Deployment> for Workload {
    fn from(deployment: Deployment) -> Self {
        Workload::Deployment(deployment)
    }
}

impl From<DaemonSet> for Workload {
    fn from(daemonset: DaemonSet) -> Self {
        Workload::DaemonSet(daemonset)
    }
}

impl From<StatefulSet> for Workload {
    fn from(statefulset: StatefulSet) -> Self {
        Workload::StatefulSet(statefulset)
    }
}
