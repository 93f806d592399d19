// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (one per piped stream)
//!   wait (or cancel / timeout)
//!   join readers --> captured strings
//!   --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//! ```

use crate::error::{ProcessError, RepofmtError, Result};
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Spawns a reader task for a piped stream.
///
/// The stream is drained even when the flags keep and forward nothing.
fn spawn_reader<R>(
    stream: Option<R>,
    kind: StreamKind,
    flags: StreamFlags,
    process_name: &str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let name = process_name.to_string();
    stream.map(|stream| tokio::spawn(read_stream(stream, kind, flags, name)))
}

/// Reads a stream line by line, forwarding to the log and/or keeping the text.
async fn read_stream<R>(reader: R, kind: StreamKind, flags: StreamFlags, name: String) -> String
where
    R: AsyncRead + Unpin,
{
    let mut kept = String::new();
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    match kind {
                        StreamKind::Stdout => debug!(process = %name, "{line}"),
                        StreamKind::Stderr => warn!(process = %name, "{line}"),
                    }
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    if !kept.is_empty() {
                        kept.push('\n');
                    }
                    kept.push_str(&line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(process = %name, stream = kind.as_str(), error = %e, "error reading stream");
                break;
            }
        }
    }

    kept
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process, streaming its output and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let stdout_handle = spawn_reader(
            child.stdout.take(),
            StreamKind::Stdout,
            self.stdout_config(),
            name,
        );
        let stderr_handle = spawn_reader(
            child.stderr.take(),
            StreamKind::Stderr,
            self.stderr_config(),
            name,
        );

        let timeout = self.timeout_duration();

        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, terminating process");
                child.kill().await.ok();
                let status = child.wait().await
                    .with_context(|| format!("failed waiting for process {name} to exit"))?;
                (status, true)
            }
            () = sleep_or_pending(timeout) => {
                warn!(process = %name, timeout = ?timeout, "process timed out");
                child.kill().await.ok();
                child.wait().await.ok();
                return Err(RepofmtError::from(ProcessError::Timeout {
                    command: name.to_string(),
                    timeout_secs: timeout.map_or(0, |t| t.as_secs()),
                })
                .into());
            }
        };

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            stdout,
            stderr,
            interrupted,
        ))
    }
}

async fn sleep_or_pending(timeout: Option<std::time::Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}
