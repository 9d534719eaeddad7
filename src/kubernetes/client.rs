// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from a kubeconfig file or in-cluster credentials

use crate::error::{Result, RolloutError};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Create a Kubernetes client.
///
/// With a kubeconfig path the file is loaded and `context` (if any) overrides its
/// current-context. Without one, in-cluster service account credentials are used.
/// Neither path falls back to the other.
#[instrument]
pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            info!("Loading cluster credentials from {}", path.display());
            config_from_kubeconfig(path, context).await?
        }
        None => {
            info!("Loading in-cluster credentials");
            KConfig::incluster().map_err(|e| {
                RolloutError::KubeconfigError(format!("Failed to load in-cluster config: {}", e))
            })?
        }
    };

    debug!("Using cluster {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| RolloutError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Build a client config from a kubeconfig file, optionally overriding the context
pub(crate) async fn config_from_kubeconfig(path: &Path, context: Option<&str>) -> Result<KConfig> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        RolloutError::KubeconfigError(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| RolloutError::KubeconfigError(format!("Failed to create config: {}", e)))
}
