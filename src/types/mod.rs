// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Workload model shared by the lister, selector and trigger.

pub mod workload;

pub use workload::{Workload, WorkloadKind};
