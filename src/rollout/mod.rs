// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Workload selection and rollout triggering.

pub mod orchestrator;
pub mod selector;
pub mod trigger;

pub use orchestrator::{NamespaceFailure, NamespaceResult, Orchestrator, RunSummary};
pub use selector::Selector;
pub use trigger::{trigger, TriggerSpec, TriggeredWorkload};
