//! Markdown reference pages for the command tree
//!
//! One page per visible command, named after the command path with spaces
//! replaced by underscores (`tk.md`, `tk_deploy.md`, ...).

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Arg, Command};

/// Where `tk docgen` writes its pages, relative to the working directory
pub const DOCS_DIR: &str = "./docs/cmd";

#[derive(Debug, thiserror::Error)]
pub enum DocgenError {
    #[error("failed to create documentation directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write a page for `cmd` and each of its visible subcommands into `dir`.
///
/// Returns the paths written, parents before children.
pub fn generate_markdown_tree(cmd: &Command, dir: &Path) -> Result<Vec<PathBuf>, DocgenError> {
    let date = Local::now().format("%-d-%b-%Y").to_string();
    write_markdown_tree(cmd, dir, &date)
}

/// [`generate_markdown_tree`] with a fixed footer date
pub fn write_markdown_tree(
    cmd: &Command,
    dir: &Path,
    date: &str,
) -> Result<Vec<PathBuf>, DocgenError> {
    fs::create_dir_all(dir).map_err(|source| DocgenError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    // Building adds the generated help/version flags to every command
    let mut root = cmd.clone();
    root.build();

    let mut written = Vec::new();
    write_command(&root, &[], dir, date, &mut written)?;
    Ok(written)
}

fn write_command(
    cmd: &Command,
    parents: &[&Command],
    dir: &Path,
    date: &str,
    written: &mut Vec<PathBuf>,
) -> Result<(), DocgenError> {
    let path = dir.join(format!("{}.md", file_stem(parents, cmd)));
    fs::write(&path, render_page(cmd, parents, date)).map_err(|source| DocgenError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote command reference");
    written.push(path);

    let lineage = parents_with(parents, cmd);
    for child in visible_subcommands(cmd) {
        write_command(child, &lineage, dir, date, written)?;
    }
    Ok(())
}

/// Render the markdown page for `cmd`, whose ancestors are `parents` (root first)
pub fn render_page(cmd: &Command, parents: &[&Command], date: &str) -> String {
    let path = command_path(parents, cmd);
    let short = about(cmd);
    let long = cmd
        .get_long_about()
        .map(ToString::to_string)
        .unwrap_or_else(|| short.clone());

    let inherited = inherited_flags(parents);
    let local: Vec<&Arg> = cmd
        .get_arguments()
        .filter(|arg| is_visible_flag(arg))
        .filter(|arg| !inherited.iter().any(|i| i.get_id() == arg.get_id()))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "## {path}\n");
    if !short.is_empty() {
        let _ = writeln!(out, "{short}\n");
    }

    let _ = writeln!(out, "### Synopsis\n");
    if !long.is_empty() {
        let _ = writeln!(out, "{long}\n");
    }
    let _ = writeln!(out, "```\n{path} [flags]");
    if visible_subcommands(cmd).next().is_some() {
        let _ = writeln!(out, "{path} [command]");
    }
    let _ = writeln!(out, "```\n");

    if !local.is_empty() {
        let _ = writeln!(out, "### Options\n\n```\n{}```\n", flag_block(&local));
    }
    if !inherited.is_empty() {
        let _ = writeln!(
            out,
            "### Options inherited from parent commands\n\n```\n{}```\n",
            flag_block(&inherited)
        );
    }

    let mut children: Vec<&Command> = visible_subcommands(cmd).collect();
    children.sort_by_key(|child| child.get_name());
    if !parents.is_empty() || !children.is_empty() {
        let lineage = parents_with(parents, cmd);
        let _ = writeln!(out, "### SEE ALSO\n");
        if let Some((parent, grandparents)) = parents.split_last() {
            let _ = writeln!(out, "{}", see_also(parent, grandparents));
        }
        for child in &children {
            let _ = writeln!(out, "{}", see_also(child, &lineage));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "###### Auto generated by tk docgen on {date}");
    out
}

fn parents_with<'a>(parents: &[&'a Command], cmd: &'a Command) -> Vec<&'a Command> {
    let mut lineage = parents.to_vec();
    lineage.push(cmd);
    lineage
}

fn see_also(cmd: &Command, parents: &[&Command]) -> String {
    format!(
        "* [{}]({}.md)\t - {}",
        command_path(parents, cmd),
        file_stem(parents, cmd),
        about(cmd)
    )
}

fn visible_subcommands(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands()
        .filter(|sub| !sub.is_hide_set() && sub.get_name() != "help")
}

fn command_path(parents: &[&Command], cmd: &Command) -> String {
    parents
        .iter()
        .map(|parent| parent.get_name())
        .chain([cmd.get_name()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn file_stem(parents: &[&Command], cmd: &Command) -> String {
    command_path(parents, cmd).replace(' ', "_")
}

fn about(cmd: &Command) -> String {
    cmd.get_about().map(ToString::to_string).unwrap_or_default()
}

fn is_visible_flag(arg: &Arg) -> bool {
    !arg.is_positional() && !arg.is_hide_set()
}

/// Global flags declared on any ancestor, nearest declaration first
fn inherited_flags<'a>(parents: &[&'a Command]) -> Vec<&'a Arg> {
    let mut flags: Vec<&Arg> = Vec::new();
    for parent in parents.iter().rev() {
        for arg in parent.get_arguments() {
            if arg.is_global_set()
                && is_visible_flag(arg)
                && !flags.iter().any(|seen| seen.get_id() == arg.get_id())
            {
                flags.push(arg);
            }
        }
    }
    flags
}

/// Aligned `  -s, --long type   help (default ...)` lines, sorted by flag name
fn flag_block(args: &[&Arg]) -> String {
    let mut sorted = args.to_vec();
    sorted.sort_by_key(|arg| flag_name(arg));
    let rows: Vec<(String, String)> = sorted.iter().map(|arg| flag_row(arg)).collect();
    let width = rows.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (flag, help) in rows {
        let _ = writeln!(out, "{flag:width$}   {help}");
    }
    out
}

fn flag_name(arg: &Arg) -> String {
    arg.get_long()
        .map(str::to_string)
        .unwrap_or_else(|| arg.get_id().to_string())
}

fn flag_row(arg: &Arg) -> (String, String) {
    let mut flag = match (arg.get_short(), arg.get_long()) {
        (Some(short), Some(long)) => format!("  -{short}, --{long}"),
        (Some(short), None) => format!("  -{short}"),
        (None, Some(long)) => format!("      --{long}"),
        (None, None) => format!("      {}", arg.get_id()),
    };

    let value_name = arg
        .get_value_names()
        .and_then(|names| names.first())
        .map(ToString::to_string);
    if arg.get_action().takes_values() {
        let _ = write!(flag, " {}", value_name.as_deref().unwrap_or("string"));
    }

    let mut help = arg.get_help().map(ToString::to_string).unwrap_or_default();
    let defaults: Vec<String> = arg
        .get_default_values()
        .iter()
        .map(|value| value.to_string_lossy().into_owned())
        .collect();
    if let [default] = defaults.as_slice() {
        match value_name.as_deref() {
            Some("string") => {
                let _ = write!(help, " (default \"{default}\")");
            }
            // Durations are shown normalised, e.g. `5m` as `5m0s`
            Some("duration") => match tk_types::parse_duration(default) {
                Ok(duration) => {
                    let _ = write!(help, " (default {})", tk_types::format_duration(duration));
                }
                Err(_) => {
                    let _ = write!(help, " (default {default})");
                }
            },
            _ => {
                let _ = write!(help, " (default {default})");
            }
        }
    }

    (flag, help)
}
