//! Kubernetes client bootstrap for tk
//!
//! This crate resolves where the user's kubeconfig lives and turns it into a
//! `kube::Client` that subcommands can use.

mod client;
mod home;

pub use client::{ClientError, build_client};
pub use home::{
    default_kubeconfig, default_kubeconfig_for, home_dir, home_dir_with, kubeconfig_under,
};
