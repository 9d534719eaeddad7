// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use rollout_trigger::config::Config;
use rollout_trigger::kubernetes::connect;
use rollout_trigger::rollout::{Orchestrator, RunSummary};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(config.verbosity.as_str())
        .init();

    // Refuse bad configuration before contacting the cluster
    config.validate()?;
    let namespaces = config.namespaces();
    let selector = config.selector();
    info!(
        "Configuration loaded: namespaces={}, selector={}={}, trigger={}",
        namespaces.join(","),
        selector.key(),
        selector.value(),
        config.annotation_trigger
    );

    // Create Kubernetes client
    let kubeconfig = config.kubeconfig_path();
    let client = connect(kubeconfig.as_deref(), config.context())
        .await
        .context("failed to connect to Kubernetes cluster")?;
    info!("Connected to Kubernetes cluster");

    let orchestrator = Orchestrator::new(client, config.selector(), config.trigger_spec())
        .with_dry_run(config.dry_run)
        .with_concurrency(config.concurrency);

    let results = orchestrator.run_all(&namespaces).await;
    let summary = RunSummary::from_results(&results);

    if summary.has_failures() {
        warn!(
            "Finished with failures: {} namespace(s) succeeded, {} failed, {} workload(s) triggered",
            summary.succeeded, summary.failed, summary.triggered
        );
    } else {
        info!(
            "Finished: {} namespace(s) succeeded, {} workload(s) triggered",
            summary.succeeded, summary.triggered
        );
    }

    if config.fail_on_error && summary.has_failures() {
        bail!("{} namespace(s) failed", summary.failed);
    }

    Ok(())
}
