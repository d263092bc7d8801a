//! What every subcommand handler receives

use anyhow::Result;
use tk_types::GlobalConfig;

/// Resolved configuration plus access to the cluster and the shell
#[derive(Clone, Debug)]
pub struct Context {
    config: GlobalConfig,
}

impl Context {
    pub fn new(config: GlobalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Build a Kubernetes client from the configured kubeconfig
    pub async fn kube_client(&self) -> Result<kube::Client> {
        Ok(tk_k8s::build_client(&self.config.kubeconfig).await?)
    }

    /// Run a shell command and return its combined output
    pub fn sh(&self, command: &str) -> Result<String> {
        Ok(tk_exec::run(command)?)
    }
}
