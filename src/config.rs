// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{annotations, run};
use crate::rollout::{Selector, TriggerSpec};
use anyhow::{bail, Result};
use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Configuration loaded from command-line flags, falling back to environment variables
#[derive(Parser, Debug, Clone)]
#[command(
    about = "trigger a rolling update of annotated workloads in one or more namespaces",
    version
)]
pub struct Config {
    /// Path to a kubeconfig file; defaults to ~/.kube/config if present, otherwise in-cluster credentials
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Context of the kubeconfig to use instead of its current-context
    #[arg(long, env = "KUBECONTEXT")]
    pub kubecontext: Option<String>,

    /// Namespace to process (repeatable; the environment variable is space separated)
    #[arg(
        short = 'n',
        long = "namespace",
        env = "K8S_ROLLINGUPDATE_NAMESPACE",
        value_delimiter = ' ',
        required = true
    )]
    pub namespaces: Vec<String>,

    /// Only trigger workloads carrying this annotation
    #[arg(long = "annotation", env = "K8S_ROLLINGUPDATE_ANNOTATION", default_value = "")]
    pub annotation_selector: String,

    /// Only trigger workloads whose selector annotation has this value (needs --annotation)
    #[arg(
        long = "annotation-value",
        env = "K8S_ROLLINGUPDATE_ANNOTATION_VALUE",
        default_value = ""
    )]
    pub annotation_selector_value: String,

    /// Annotation written to trigger the rolling update
    #[arg(
        long = "annotation-autorollout",
        env = "K8S_ROLLINGUPDATE_ANNOTATION_TRIGGER",
        default_value = annotations::DEFAULT_TRIGGER
    )]
    pub annotation_trigger: String,

    /// Submit updates with server-side dry run
    #[arg(long, env = "K8S_ROLLINGUPDATE_DRY_RUN")]
    pub dry_run: bool,

    /// Number of namespaces processed at the same time
    #[arg(
        long,
        env = "K8S_ROLLINGUPDATE_CONCURRENCY",
        default_value_t = run::DEFAULT_CONCURRENCY,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub concurrency: usize,

    /// Exit with a failure status if any namespace failed
    #[arg(long, env = "K8S_ROLLINGUPDATE_FAIL_ON_ERROR")]
    pub fail_on_error: bool,

    /// Log filter directive
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub verbosity: String,
}

impl Config {
    /// Check the combination of settings before anything talks to the cluster
    pub fn validate(&self) -> Result<()> {
        if self.namespaces().is_empty() {
            bail!("at least one namespace is required");
        }
        if self.annotation_trigger.trim().is_empty() {
            bail!("the trigger annotation must not be empty");
        }
        if self.annotation_selector.is_empty() && !self.annotation_selector_value.is_empty() {
            bail!("--annotation-value requires --annotation");
        }
        Ok(())
    }

    /// Requested namespaces in order, without blank entries
    pub fn namespaces(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .map(|ns| ns.trim())
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The kubeconfig to load, or `None` to use in-cluster credentials
    pub fn kubeconfig_path(&self) -> Option<PathBuf> {
        self.kubeconfig
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(default_kubeconfig)
    }

    pub fn context(&self) -> Option<&str> {
        self.kubecontext.as_deref().filter(|c| !c.is_empty())
    }

    pub fn selector(&self) -> Selector {
        Selector::new(&self.annotation_selector, &self.annotation_selector_value)
    }

    pub fn trigger_spec(&self) -> TriggerSpec {
        TriggerSpec::new(&self.annotation_trigger)
    }
}

fn default_kubeconfig() -> Option<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .filter(|path| path.is_file())
}
