//! Shell command execution for tk
//!
//! Commands are handed to `/bin/sh -c` as a single expression. Standard output
//! and standard error share one pipe, so the captured text is interleaved the
//! same way it would appear in a terminal.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

/// Shell used to interpret command strings
pub const SHELL: &str = "/bin/sh";

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed: {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Run `command` through the shell and return its combined output.
///
/// Blocks until the shell exits. The child inherits this process's
/// environment and working directory. When the command does not exit
/// successfully its output is dropped and only the status is reported.
pub fn run(command: &str) -> Result<String, ExecError> {
    let spawn_error = |source| ExecError::Spawn {
        command: command.to_string(),
        source,
    };

    tracing::debug!(command, "running shell command");

    let (mut reader, writer) = io::pipe().map_err(spawn_error)?;
    let mut child = {
        // The command holds both write ends; it has to be dropped before
        // reading or the pipe never reports EOF.
        let mut cmd = Command::new(SHELL);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(spawn_error)?)
            .stderr(writer);
        cmd.spawn().map_err(spawn_error)?
    };

    let mut output = Vec::new();
    let read = reader.read_to_end(&mut output);
    let status = child.wait().map_err(spawn_error)?;
    read.map_err(spawn_error)?;

    tracing::debug!(command, %status, bytes = output.len(), "shell command finished");

    if !status.success() {
        return Err(ExecError::Failed {
            command: command.to_string(),
            status,
        });
    }

    Ok(String::from_utf8_lossy(&output).into_owned())
}
