// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> resolve_root --> config_loader --> cmd::run_* handlers
//!   fmt, list, options, configs
//! ```

pub mod config;
pub mod fmt;
pub mod list;


use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::error::{FsError, RepofmtError, Result};
use crate::git::discover_root;

/// Name of the configuration file looked up in the repository root.
pub const DEFAULT_CONFIG_FILE: &str = "repofmt.toml";

/// Prefix of configuration environment variables, e.g. `REPOFMT_GLOBAL__DRY`.
pub const ENV_PREFIX: &str = "REPOFMT";

/// Resolves the repository root.
///
/// An explicit root must be an existing directory; otherwise the git work
/// tree containing `cwd` is used.
///
/// # Errors
///
/// Returns `FsError::NotFound` for a missing explicit root, or a git error
/// when `cwd` is not inside a work tree.
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let Some(root) = explicit else {
        return Ok(discover_root(cwd)?);
    };

    let root = cwd.join(root);
    if !root.is_dir() {
        return Err(RepofmtError::from(FsError::NotFound(root.display().to_string())).into());
    }
    let root = std::path::absolute(&root)
        .with_context(|| format!("failed to resolve root {}", root.display()))?;
    Ok(root)
}

/// Builds the layered configuration loader for a run rooted at `root`.
///
/// ```text
/// defaults < <root>/repofmt.toml < --config... < REPOFMT_* < --set < flags
/// ```
///
/// # Errors
///
/// Returns an error if a `--set` pair is malformed.
pub fn config_loader(global: &GlobalOptions, root: &Path) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(root.join(DEFAULT_CONFIG_FILE));
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for pair in global.to_config_overrides() {
        loader = loader.set_path(&pair)?;
    }
    Ok(loader)
}
