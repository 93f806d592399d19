// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repair of symlinks checked out as plain files.
//!
//! Git without symlink support (Windows by default) writes a symlink as a
//! regular file whose content is the link target. Formatters would then
//! rewrite the placeholder, or miss the real file behind it.
//!
//! ```text
//! index entry (mode 120000)
//!   work tree: symlink      --> left alone
//!   work tree: regular file --> read target, write link to temp name,
//!                               rename over the placeholder
//!   work tree: missing/dir  --> left alone
//!   outside `root`          --> left alone
//! ```

use crate::error::{GitError, RepofmtError, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

static SYMLINKS_FIXED: AtomicBool = AtomicBool::new(false);

/// Placeholders longer than this are real files, not link targets.
const MAX_TARGET_LEN: u64 = 4096;

/// Outcome of a symlink repair pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymlinkReport {
    /// Index entries with symlink mode.
    pub checked: usize,
    /// Placeholders replaced by real symlinks (or that would be, in dry-run).
    pub repaired: usize,
    /// Placeholders that could not be replaced.
    pub failed: usize,
}

/// Repairs symlink placeholders in the repository at `root`, once per process.
///
/// Later calls return an empty report without touching the work tree.
///
/// # Errors
///
/// Returns an error if the repository index cannot be read.
pub fn fix_symlinks(root: &Path, dry_run: bool) -> Result<SymlinkReport> {
    if SYMLINKS_FIXED.swap(true, Ordering::SeqCst) {
        debug!("symlinks already repaired in this process");
        return Ok(SymlinkReport::default());
    }
    repair_symlinks(root, dry_run)
}

/// Repairs symlink placeholders in the repository at `root`.
///
/// Only entries under `root` are considered, even when `root` is a
/// subdirectory of the work tree. Outside a git repository this does
/// nothing. A failure on one entry is logged and counted in
/// [`SymlinkReport::failed`].
///
/// # Errors
///
/// Returns `GitError::Index` if the repository index cannot be read.
pub fn repair_symlinks(root: &Path, dry_run: bool) -> Result<SymlinkReport> {
    let Ok(repo) = gix::discover(root) else {
        debug!(root = %root.display(), "not a git repository, skipping symlink repair");
        return Ok(SymlinkReport::default());
    };
    let Some(workdir) = repo.workdir().map(Path::to_path_buf) else {
        debug!(root = %root.display(), "bare repository, skipping symlink repair");
        return Ok(SymlinkReport::default());
    };

    // Index paths are relative to the work tree, `root` may sit below it
    let Some(scope) = scope_within(&workdir, root) else {
        debug!(root = %root.display(), workdir = %workdir.display(), "root is outside the work tree, skipping symlink repair");
        return Ok(SymlinkReport::default());
    };

    let index = repo.index_or_empty().map_err(|e| {
        RepofmtError::from(GitError::Index {
            path: workdir.display().to_string(),
            message: e.to_string(),
        })
    })?;

    let mut report = SymlinkReport::default();

    for entry in index.entries() {
        if entry.mode != gix::index::entry::Mode::SYMLINK {
            continue;
        }
        let relative = gix::path::from_bstr(entry.path(&index)).into_owned();
        if !relative.starts_with(&scope) {
            continue;
        }
        report.checked += 1;

        let path = workdir.join(&relative);

        let Ok(meta) = std::fs::symlink_metadata(&path) else {
            continue;
        };
        if !meta.file_type().is_file() {
            continue;
        }

        match repair_one(&path, meta.len(), dry_run) {
            Ok(target) => {
                report.repaired += 1;
                if dry_run {
                    info!(path = %relative.display(), target = %target.display(), "[dry-run] would restore symlink");
                } else {
                    info!(path = %relative.display(), target = %target.display(), "restored symlink");
                }
            }
            Err(e) => {
                report.failed += 1;
                warn!(path = %relative.display(), error = %e, "failed to restore symlink");
            }
        }
    }

    debug!(
        checked = report.checked,
        repaired = report.repaired,
        failed = report.failed,
        "symlink repair finished"
    );
    Ok(report)
}

/// Returns `root` relative to `workdir`, or `None` if it lies outside.
fn scope_within(workdir: &Path, root: &Path) -> Option<PathBuf> {
    let canonical = |p: &Path| std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    canonical(root)
        .strip_prefix(canonical(workdir))
        .ok()
        .map(Path::to_path_buf)
}

/// Replaces one placeholder file with a symlink to the path it contains.
fn repair_one(path: &Path, len: u64, dry_run: bool) -> std::io::Result<PathBuf> {
    if len == 0 || len > MAX_TARGET_LEN {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("placeholder has {len} bytes, not a link target"),
        ));
    }

    let content = std::fs::read_to_string(path)?;
    let target = content.trim_end_matches(['\r', '\n']);
    if target.is_empty() || target.contains(['\0', '\n']) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "placeholder content is not a link target",
        ));
    }
    let target = PathBuf::from(target);

    if dry_run {
        return Ok(target);
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!(".{file_name}.repofmt-link"));
    let _ = std::fs::remove_file(&staging);

    create_symlink(&target, &staging, path)?;
    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(e);
    }

    Ok(target)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path, _placeholder: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path, placeholder: &Path) -> std::io::Result<()> {
    let resolved = placeholder
        .parent()
        .map_or_else(|| target.to_path_buf(), |dir| dir.join(target));
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
