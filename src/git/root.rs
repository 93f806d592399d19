// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository root discovery.

use crate::error::{GitError, RepofmtResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the work tree of the repository containing `start`.
///
/// # Errors
///
/// - `GitError::RepoNotFound` if no repository contains `start`.
/// - `GitError::BareRepository` if the repository has no work tree.
pub fn discover_root(start: &Path) -> RepofmtResult<PathBuf> {
    let start = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());
    let repo = gix::discover(&start).map_err(|e| {
        debug!(path = %start.display(), error = %e, "repository discovery failed");
        GitError::RepoNotFound {
            path: start.display().to_string(),
        }
    })?;

    let workdir = repo.workdir().ok_or_else(|| GitError::BareRepository {
        path: repo.path().display().to_string(),
    })?;

    debug!(root = %workdir.display(), "discovered repository root");
    Ok(workdir.to_path_buf())
}
