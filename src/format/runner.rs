// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runner for orchestrating formatter execution.
//!
//! ```text
//! FormatRunner::new(root)
//!   .with_dry_run()  .with_cancel_token()  .extend(tools)
//!   .run_all().await
//!       tools run one at a time, in the order added
//!       cancellation checked between tools
//!       first error aborts with "formatter family '<name>' failed"
//! ```

use std::path::{Path, PathBuf};

use crate::error::{ProcessError, RepofmtError, Result};
use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::discovery::collect_files;
use super::tool::FormatterTool;
use super::{Tool, ToolContext};
use crate::config::Config;

/// Builds a formatter tool for every enabled family, in run order.
///
/// # Errors
///
/// Returns an error if file discovery fails for a family.
pub fn plan(config: &Config, root: &Path) -> Result<Vec<FormatterTool>> {
    let mut tools = Vec::new();
    for (kind, family) in config.families() {
        if !family.enabled {
            debug!(family = %kind, "family disabled");
            continue;
        }
        let files = collect_files(root, &family, &config.walk)
            .with_context(|| format!("failed to collect files for family '{kind}'"))?;
        tools.push(FormatterTool::from_config(kind, &family, root, files));
    }
    Ok(tools)
}

/// Runs formatter tools strictly one after another.
pub struct FormatRunner {
    /// Tools to execute, in order.
    tools: Vec<Box<dyn Tool>>,

    /// Cancellation token for cooperative cancellation.
    cancel_token: CancellationToken,

    /// Working directory of every formatter.
    root: PathBuf,

    /// Whether to run in dry-run mode.
    dry_run: bool,
}

impl FormatRunner {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            tools: Vec::new(),
            cancel_token: CancellationToken::new(),
            root: root.into(),
            dry_run: false,
        }
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Shares an externally owned cancellation token (e.g. Ctrl+C).
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Adds every tool from an iterator, in order.
    pub fn extend<T: Tool + 'static>(&mut self, tools: impl IntoIterator<Item = T>) {
        self.tools
            .extend(tools.into_iter().map(|t| Box::new(t) as Box<dyn Tool>));
    }

    /// Runs all tools sequentially.
    ///
    /// Checks for cancellation between tools. Later tools never start once
    /// one fails.
    ///
    /// # Errors
    ///
    /// Returns the first tool error, with the tool's name as context, or
    /// `ProcessError::Interrupted` if cancellation is requested.
    pub async fn run_all(&self) -> Result<()> {
        if self.tools.is_empty() {
            debug!("No formatters to run");
            return Ok(());
        }

        info!(formatter_count = self.tools.len(), "Starting formatters");

        let ctx = ToolContext::new(self.root.clone(), self.cancel_token.clone(), self.dry_run);

        for (i, tool) in self.tools.iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                return Err(RepofmtError::from(ProcessError::Interrupted {
                    command: tool.name().to_string(),
                })
                .into());
            }

            debug!(
                family = %tool.name(),
                index = i + 1,
                total = self.tools.len(),
                "Running formatter"
            );

            tool.run(&ctx)
                .await
                .with_context(|| format!("formatter family '{}' failed", tool.name()))?;
        }

        info!("All formatters completed successfully");
        Ok(())
    }
}
