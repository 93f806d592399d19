// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! One external formatter applied to one family's files.
//!
//! ```text
//! FamilyConfig --> FormatterTool
//!   args  = family.args + split($extra_args_env)   (read once, here)
//!   env   = current_env + path_prepend + family.env
//!   files = FileSet
//!
//! run(ctx)
//!   no files          --> skip (info)
//!   resolve program   --> ExecutableNotFound aborts the run
//!   batch             --> program args... files...
//!   per-file          --> program args... file   (once per file)
//!   timeout_secs      --> each invocation killed after the limit
//!   dry-run           --> log command line only
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ProcessError, RepofmtError, Result};
use anyhow::Context;
use tracing::{debug, info, warn};

use super::discovery::FileSet;
use super::{Tool, ToolContext};
use crate::config::types::{FamilyConfig, FamilyKind, InvocationMode};
use crate::core::env::container::Env;
use crate::core::env::{current_env, split_flags_var};
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::logging::LogContext;
use futures_util::future::BoxFuture;

/// Runs one family's formatter over its files.
#[derive(Debug, Clone)]
pub struct FormatterTool {
    kind: FamilyKind,
    program: String,
    args: Vec<String>,
    env: Env,
    files: FileSet,
    mode: InvocationMode,
    timeout: Option<Duration>,
}

impl FormatterTool {
    /// Builds the tool for a family.
    ///
    /// The family's `extra_args_env` variable is read here, once.
    #[must_use]
    pub fn from_config(kind: FamilyKind, family: &FamilyConfig, root: &Path, files: FileSet) -> Self {
        let mut args = family.args.clone();
        if let Some(var) = &family.extra_args_env {
            let extra = split_flags_var(var);
            if !extra.is_empty() {
                debug!(family = %kind, var = %var, extra = ?extra, "extra formatter flags");
            }
            args.extend(extra);
        }

        Self {
            kind,
            program: family.program.clone(),
            args,
            env: family_env(current_env(), family, root),
            files,
            mode: family.mode,
            timeout: family.timeout_secs.map(Duration::from_secs),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FamilyKind {
        self.kind
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Flags placed before the file list, extra flags included.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    #[must_use]
    pub const fn files(&self) -> &FileSet {
        &self.files
    }

    #[must_use]
    pub const fn mode(&self) -> InvocationMode {
        self.mode
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolves the formatter executable.
    ///
    /// A program containing a path separator is resolved against `root`; a
    /// bare name is searched in the family's `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if no executable matches.
    pub fn resolve_program(&self, root: &Path) -> Result<PathBuf> {
        let builder = ProcessBuilder::which_in(&self.program, self.env.get("PATH"), root)
            .map_err(RepofmtError::from)?;
        Ok(builder.program().clone())
    }

    /// Command lines this tool runs, one entry per invocation.
    #[must_use]
    pub fn invocations(&self) -> Vec<Vec<PathBuf>> {
        match self.mode {
            InvocationMode::Batch => vec![self.files.as_slice().to_vec()],
            InvocationMode::PerFile => self.files.iter().map(|f| vec![f.clone()]).collect(),
        }
    }

    fn command(&self, program: &Path, files: &[PathBuf], root: &Path) -> ProcessBuilder {
        let builder = ProcessBuilder::new(program)
            .args(&self.args)
            .args(files)
            .cwd(root)
            .env(self.env.clone())
            .stdout_flags(StreamFlags::FORWARD_TO_LOG)
            .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING);
        match self.timeout {
            Some(limit) => builder.timeout(limit),
            None => builder,
        }
    }

    fn log_context(&self) -> LogContext {
        let mut log = LogContext::with_family(self.kind.as_str());
        let tool = Path::new(&self.program)
            .file_name()
            .map_or_else(|| self.program.clone(), |n| n.to_string_lossy().into_owned());
        log.set_tool(tool);
        log
    }
}

/// Environment of a family's formatter: the inherited environment with the
/// family's `PATH` entries and variables applied.
pub(super) fn family_env(mut env: Env, family: &FamilyConfig, root: &Path) -> Env {
    // Reversed so the first configured entry ends up first
    for dir in family.path_prepend.iter().rev() {
        env.prepend_path(root.join(dir));
    }
    for (key, value) in &family.env {
        env.set(key.clone(), value.clone());
    }
    env
}

impl Tool for FormatterTool {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let log = self.log_context();

            if self.files.is_empty() {
                info!(family = %self.kind, "{}no files to format, skipping", log.prefix());
                return Ok(());
            }

            let program = if ctx.is_dry_run() {
                self.resolve_program(ctx.root()).unwrap_or_else(|e| {
                    warn!(family = %self.kind, error = %e, "{}formatter not found", log.prefix());
                    PathBuf::from(&self.program)
                })
            } else {
                self.resolve_program(ctx.root())?
            };

            for files in self.invocations() {
                let builder = self.command(&program, &files, ctx.root());

                if ctx.is_dry_run() {
                    info!(
                        family = %self.kind,
                        files = files.len(),
                        "{}[dry-run] would run: {}",
                        log.prefix(),
                        builder.command_line()
                    );
                    continue;
                }

                debug!(family = %self.kind, program = %program.display(), files = files.len(), "running formatter");

                let output = builder
                    .run_with_cancellation(ctx.cancel_token().clone())
                    .await
                    .with_context(|| format!("failed to run {}", self.program))?;

                if output.is_interrupted() {
                    return Err(RepofmtError::from(ProcessError::Interrupted {
                        command: self.program.clone(),
                    })
                    .into());
                }
            }

            if !ctx.is_dry_run() {
                info!(family = %self.kind, files = self.files.len(), "{}formatted", log.prefix());
            }
            Ok(())
        })
    }
}
