//! Command-line surface of tk

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use tk_types::{DEFAULT_NAMESPACE, DEFAULT_TIMEOUT_FLAG, GlobalConfig, parse_duration};

const KUBECONFIG_HELP: &str = "path to the kubeconfig file";
const KUBECONFIG_HELP_NO_HOME: &str = "absolute path to the kubeconfig file";

/// Kubeconfig default shown in generated documentation
pub const DOCS_KUBECONFIG_DEFAULT: &str = "~/.kube/config";

/// Root command
#[derive(Parser, Debug)]
#[command(name = "tk", version)]
#[command(about = "Command line utility for assembling Kubernetes CD pipelines")]
#[command(long_about = "Command line utility for assembling Kubernetes CD pipelines.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// the namespace scope for this operation
    #[arg(long, global = true, value_name = "string", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// timeout for this operation
    #[arg(
        long,
        global = true,
        value_name = "duration",
        default_value = DEFAULT_TIMEOUT_FLAG,
        value_parser = parse_duration
    )]
    pub timeout: Duration,

    /// path to the kubeconfig file
    #[arg(long, global = true, value_name = "string")]
    pub kubeconfig: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate markdown documentation for every command
    #[command(hide = true)]
    Docgen,
}

/// Reserved first argument that generates documentation before any flag is parsed
pub const DOCGEN: &str = "docgen";

/// Whether `args` (including the binary name) asks for documentation.
///
/// Only the first argument counts, and nothing after it is looked at, so
/// flags that would fail to parse cannot stop documentation from being written.
pub fn is_docgen(args: &[OsString]) -> bool {
    args.get(1).is_some_and(|first| first == DOCGEN)
}

/// Build the root command with the kubeconfig default filled in.
///
/// Without a default the flag is still accepted but resolves to an empty path.
pub fn command(kubeconfig_default: Option<&Path>) -> clap::Command {
    Cli::command().mut_arg("kubeconfig", |arg| match kubeconfig_default {
        Some(path) => arg
            .default_value(path.as_os_str().to_os_string())
            .help(KUBECONFIG_HELP),
        None => arg.help(KUBECONFIG_HELP_NO_HOME),
    })
}

/// Root command as it appears in generated documentation
pub fn docs_command() -> clap::Command {
    command(Some(Path::new(DOCS_KUBECONFIG_DEFAULT)))
}

/// A parsed command line
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    command: clap::Command,
}

/// Parse `args` (including the binary name) with `kubeconfig_default` as the
/// `--kubeconfig` default. `None` leaves the kubeconfig empty unless given.
pub fn parse_from<I, T>(
    args: I,
    kubeconfig_default: Option<&Path>,
) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = command(kubeconfig_default);
    let matches = command.try_get_matches_from_mut(args)?;
    let cli = Cli::from_arg_matches(&matches)?;

    Ok(Invocation { cli, command })
}

impl Invocation {
    pub fn subcommand(&self) -> Option<&Commands> {
        self.cli.command.as_ref()
    }

    /// The global configuration as given on the command line
    pub fn config(&self) -> GlobalConfig {
        let args = &self.cli.global;
        GlobalConfig::new(
            args.kubeconfig.clone().unwrap_or_default(),
            args.namespace.clone(),
            args.timeout,
        )
    }

    /// Print the root help to stdout
    pub fn print_help(&mut self) -> std::io::Result<()> {
        self.command.print_help()
    }
}

/// Turn a clap parse error into a one-line error for the failure reporter
pub fn usage_error(err: &clap::Error) -> anyhow::Error {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    anyhow::anyhow!("{}", first.strip_prefix("error: ").unwrap_or(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME_KUBECONFIG: &str = "/home/dev/.kube/config";

    fn config(args: &[&str], kubeconfig_default: Option<&str>) -> GlobalConfig {
        parse_from(args, kubeconfig_default.map(Path::new))
            .unwrap()
            .config()
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
        command(None).debug_assert();
        docs_command().debug_assert();
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = config(&["tk"], Some(HOME_KUBECONFIG));
        assert_eq!(
            config,
            GlobalConfig::new(
                PathBuf::from("/home/dev/.kube/config"),
                "gitops-system".to_string(),
                Duration::from_secs(300),
            )
        );
    }

    #[test]
    fn test_empty_home_leaves_kubeconfig_empty() {
        let config = config(&["tk"], None);
        assert!(!config.has_kubeconfig());

        let kubeconfig = command(None)
            .get_arguments()
            .find(|arg| arg.get_id() == "kubeconfig")
            .cloned()
            .unwrap();
        assert!(kubeconfig.get_default_values().is_empty());
        assert_eq!(
            kubeconfig.get_help().map(ToString::to_string).as_deref(),
            Some(KUBECONFIG_HELP_NO_HOME)
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = config(
            &[
                "tk",
                "--namespace",
                "flux-system",
                "--timeout",
                "90s",
                "--kubeconfig",
                "/tmp/kc",
            ],
            Some(HOME_KUBECONFIG),
        );
        assert_eq!(config.namespace, "flux-system");
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.kubeconfig, PathBuf::from("/tmp/kc"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let invocation =
            parse_from(["tk", "docgen", "--namespace", "other"], Some(Path::new(HOME_KUBECONFIG)))
                .unwrap();
        assert_eq!(invocation.subcommand(), Some(&Commands::Docgen));
        assert_eq!(invocation.config().namespace, "other");
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = parse_from(["tk", "--timeout", "soon"], Some(Path::new(HOME_KUBECONFIG))).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_usage_error_is_single_line() {
        let err = parse_from(["tk", "--bogus"], Some(Path::new(HOME_KUBECONFIG))).unwrap_err();
        let message = usage_error(&err).to_string();
        assert!(!message.contains('\n'));
        assert!(!message.starts_with("error:"));
        assert!(message.contains("--bogus"));
    }

    #[test]
    fn test_help_and_version_are_not_failures() {
        let err = parse_from(["tk", "--help"], Some(Path::new(HOME_KUBECONFIG))).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = parse_from(["tk", "--version"], Some(Path::new(HOME_KUBECONFIG))).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_docgen_only_as_first_argument() {
        assert!(is_docgen(&os_args(&["tk", "docgen"])));
        assert!(is_docgen(&os_args(&["tk", "docgen", "--timeout", "bogus"])));
        assert!(is_docgen(&os_args(&["tk", "docgen", "--unknown"])));
        assert!(!is_docgen(&os_args(&["tk"])));
        assert!(!is_docgen(&os_args(&["tk", "--namespace", "docgen"])));
        assert!(!is_docgen(&os_args(&["tk", "docgen-extra"])));
    }
}
