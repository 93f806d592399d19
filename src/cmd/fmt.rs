// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fmt command implementation for repofmt.

use std::path::Path;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::format::{FormatRunner, plan};
use crate::git::fix_symlinks;

/// Main handler for the fmt command.
///
/// Ctrl+C cancels the run and kills the running formatter.
///
/// # Errors
///
/// Returns an error if symlink repair cannot read the index, file discovery
/// fails, or a formatter is missing or fails.
pub async fn run_fmt_command(config: &Config, root: &Path) -> Result<()> {
    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting formatters...");
            signal_token.cancel();
        }
    });

    format_repository(config, root, cancel_token).await
}

/// Repairs symlinks, then runs every enabled family in order.
///
/// # Errors
///
/// See [`run_fmt_command`].
pub async fn format_repository(
    config: &Config,
    root: &Path,
    cancel_token: CancellationToken,
) -> Result<()> {
    let dry_run = config.global.dry;

    if config.global.fix_symlinks {
        let report = fix_symlinks(root, dry_run).context("failed to repair symlinks")?;
        if report.repaired > 0 || report.failed > 0 {
            tracing::info!(
                repaired = report.repaired,
                failed = report.failed,
                "Symlink repair finished"
            );
        }
    }

    let tools = plan(config, root)?;

    let mut runner = FormatRunner::new(root)
        .with_dry_run(dry_run)
        .with_cancel_token(cancel_token);
    runner.extend(tools);

    runner.run_all().await?;
    tracing::info!(root = %root.display(), "Formatting completed successfully");
    Ok(())
}
