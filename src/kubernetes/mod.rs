// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and workload access.

pub mod client;
pub mod workloads;

pub use client::connect;
pub use workloads::{list_matching, list_workloads, replace_workload};
