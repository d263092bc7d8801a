//! Shared types for tk
//!
//! This crate contains the process-wide configuration assembled from the
//! command line and the duration values accepted by `--timeout`.

mod duration;

use std::path::PathBuf;
use std::time::Duration;

pub use duration::{DurationError, format_duration, parse_duration};

// ============================================================================
// Defaults
// ============================================================================

/// Namespace used when `--namespace` is not given
pub const DEFAULT_NAMESPACE: &str = "gitops-system";

/// Timeout used when `--timeout` is not given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// `DEFAULT_TIMEOUT` as it is written on the command line
pub const DEFAULT_TIMEOUT_FLAG: &str = "5m";

// ============================================================================
// Global Configuration
// ============================================================================

/// Configuration shared by every subcommand.
///
/// Built once after argument parsing and handed to handlers by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Path to the kubeconfig file. Empty when no home directory was found
    /// and none was given.
    pub kubeconfig: PathBuf,
    pub namespace: String,
    pub timeout: Duration,
}

impl GlobalConfig {
    pub fn new(kubeconfig: PathBuf, namespace: String, timeout: Duration) -> Self {
        Self {
            kubeconfig,
            namespace,
            timeout,
        }
    }

    /// Whether a kubeconfig path is known at all
    pub fn has_kubeconfig(&self) -> bool {
        !self.kubeconfig.as_os_str().is_empty()
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self::new(PathBuf::new(), DEFAULT_NAMESPACE.to_string(), DEFAULT_TIMEOUT)
    }
}
