// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn() --> run_child()
//!              |
//!              v
//!    validate exit_code
//!    (skip if interrupted)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr }
//! ```

use crate::error::{ProcessError, RepofmtError, Result};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput};

impl ProcessBuilder {
    /// Returns the display name for this process: the program's file stem.
    pub(super) fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the process is killed and the output is
    /// returned with `interrupted = true`; the exit code is not validated.
    /// An already cancelled token returns that output without spawning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails (`ProcessError::SpawnFailed`).
    /// - The timeout elapses (`ProcessError::Timeout`).
    /// - The process exits with a non-zero code (`ProcessError::NonZeroExit`).
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        let name = self.display_name();

        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), String::new(), true));
        }

        let mut child = self.spawn(&name)?;
        let output = self.run_child(&name, &mut child, token).await?;

        if output.is_interrupted() {
            trace!(process = %name, "interrupted");
            return Ok(output);
        }
        Self::check_exit(&name, output)
    }

    fn spawn(&self, name: &str) -> Result<Child> {
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let child = self.build_command().spawn().map_err(|source| {
            RepofmtError::from(ProcessError::SpawnFailed {
                command: cmd_line,
                source,
            })
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");
        Ok(child)
    }

    fn check_exit(name: &str, output: ProcessOutput) -> Result<ProcessOutput> {
        if output.exit_code() != 0 {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(RepofmtError::from(ProcessError::NonZeroExit {
                command: name.to_string(),
                code: output.exit_code(),
            })
            .into());
        }

        trace!(process = %name, "completed");
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            for (key, value) in env.iter() {
                command.env(key, value);
            }
        }

        // Both streams are always piped; StreamFlags decide what the readers keep
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        command
    }
}
