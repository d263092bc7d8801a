use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The kubeconfig is missing, unreadable, or does not describe a usable context
    #[error("failed to load kubeconfig from {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    /// The transport could not be set up from an otherwise valid configuration
    #[error("failed to create Kubernetes client")]
    Construct(#[source] kube::Error),
}

/// Create a `kube::Client` from the kubeconfig at `path`.
///
/// Uses the file's current context. No request is sent to the API server; the
/// first call made with the client is what reaches the cluster. Must be
/// called from within a tokio runtime.
pub async fn build_client(path: &Path) -> Result<kube::Client, ClientError> {
    let config_error = |source| ClientError::Config {
        path: path.to_path_buf(),
        source,
    };

    let kubeconfig = Kubeconfig::read_from(path).map_err(config_error)?;
    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(config_error)?;

    tracing::debug!(
        kubeconfig = %path.display(),
        cluster_url = %config.cluster_url,
        namespace = %config.default_namespace,
        "building Kubernetes client"
    );

    kube::Client::try_from(config).map_err(ClientError::Construct)
}
