// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatter orchestration.
//!
//! ```text
//! Config --> plan() --> per family: collect_files() --> FormatterTool
//!                                                          |
//! FormatRunner (sequential, canonical order)  <------------'
//!   ToolContext: root, dry_run, cancel token --> run_with_cancellation
//!   first failure aborts, later families never start
//! ```
//!
//! All tools support graceful cancellation via `CancellationToken`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

pub mod discovery;
pub mod runner;
pub mod tool;

pub use discovery::{FileSet, collect_files};
pub use runner::{FormatRunner, plan};
pub use tool::FormatterTool;

/// Context provided to tools during execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Cancellation token for cooperative cancellation.
    cancel_token: CancellationToken,

    /// When true, tools log what they would run without running it.
    dry_run: bool,

    /// Repository root: working directory of every formatter.
    root: Arc<Path>,
}

impl ToolContext {
    /// Creates a new `ToolContext`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            root: Arc::from(root.into()),
        }
    }

    /// Returns the repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A unit of work run by [`FormatRunner`].
///
/// # Implementation Notes
///
/// - Use `ProcessBuilder::run_with_cancellation()` for process execution
/// - Respect `ctx.is_dry_run()` and only log actions without executing
pub trait Tool: Send + Sync {
    /// Returns the name of this tool, used in logs and error context.
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    ///
    /// # Returns
    /// * `Ok(())` if the operation completed successfully
    /// * `Err(...)` if the operation failed or was cancelled
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
mod test_utils;
