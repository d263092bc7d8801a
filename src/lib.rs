//! tk - command line utility for assembling Kubernetes CD pipelines
//!
//! The binary is a thin wrapper around [`run`]; everything else lives here so
//! the command tree can be tested without spawning processes.

pub mod cli;
pub mod console;
pub mod context;
pub mod docgen;
pub mod telemetry;

use std::ffi::OsString;
use std::path::Path;

use anyhow::{Context as _, Result};
use clap::error::ErrorKind;

use crate::cli::{Commands, Invocation};
use crate::context::Context;

/// Parse `args` (including the binary name) and execute the selected command.
///
/// `docgen` as the first argument writes documentation before any flag is
/// parsed. Help and version requests are printed here and count as success.
/// Every other problem, including bad arguments, is returned for the caller
/// to report.
pub async fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if cli::is_docgen(&args) {
        return generate_docs(Path::new(docgen::DOCS_DIR));
    }

    let kubeconfig = tk_k8s::default_kubeconfig();
    let invocation = match cli::parse_from(args, kubeconfig.as_deref()) {
        Ok(invocation) => invocation,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().context("failed to print help")?;
            return Ok(());
        }
        Err(err) => return Err(cli::usage_error(&err)),
    };

    match invocation.subcommand().cloned() {
        Some(Commands::Docgen) => generate_docs(Path::new(docgen::DOCS_DIR)),
        None => {
            let ctx = Context::new(invocation.config());
            root(invocation, &ctx).await
        }
    }
}

/// Write the markdown reference for the whole command tree into `dir`
pub fn generate_docs(dir: &Path) -> Result<()> {
    let written = docgen::generate_markdown_tree(&cli::docs_command(), dir)?;
    tracing::debug!(pages = written.len(), dir = %dir.display(), "generated documentation");
    Ok(())
}

/// The root command on its own only prints usage
async fn root(mut invocation: Invocation, ctx: &Context) -> Result<()> {
    let config = ctx.config();
    tracing::debug!(
        namespace = %config.namespace,
        timeout = %tk_types::format_duration(config.timeout),
        kubeconfig = %config.kubeconfig.display(),
        "resolved configuration"
    );
    invocation.print_help().context("failed to print help")?;
    Ok(())
}
