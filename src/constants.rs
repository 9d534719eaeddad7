// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys used by rollout-trigger
pub mod annotations {
    /// Default annotation rewritten on workloads and pod templates to force a rollout
    pub const DEFAULT_TRIGGER: &str = "rollingupdate.example.io/trigger";
}

/// The field manager recorded on every replace
pub const FIELD_MANAGER: &str = "rollout-trigger";

/// Namespace processing defaults
pub mod run {
    /// Number of namespaces processed at the same time unless configured otherwise
    pub const DEFAULT_CONCURRENCY: usize = 1;
}
