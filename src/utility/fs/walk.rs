// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};
use wax::{Glob, Program as _};

/// Options for parallel directory traversal.
///
/// The defaults see every file on disk, hidden or ignored, the way a plain
/// recursive directory listing does.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkOptions {
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    /// Respect .gitignore / .ignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    #[serde(skip_serializing_if = "Option::is_none")]
    threads: Option<usize>,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
    /// Glob patterns, relative to the root, of files never selected
    #[builder(setters(name = with_exclude), default)]
    exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect .gitignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Returns the number of threads (None = auto-detect).
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns the skip directories list.
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Returns the exclude glob patterns.
    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Compiles the exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid pattern.
    pub fn exclude_globs(&self) -> Result<Vec<Glob<'_>>> {
        self.exclude
            .iter()
            .map(|pattern| {
                Glob::new(pattern)
                    .map_err(|e| anyhow::anyhow!("invalid exclude pattern '{pattern}': {e}"))
            })
            .collect()
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(dir: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(dir);

    builder.standard_filters(false);
    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    if options.respect_gitignore() {
        builder.ignore(true);
        builder.parents(true);
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        builder.require_git(false);
    }

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    // Evaluated before descending
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Joins the thread draining the walk channel.
///
/// A panic in the collector becomes an error instead of an empty file list.
pub(super) fn join_collector<T>(
    collector: std::thread::ScopedJoinHandle<'_, Vec<T>>,
    dir: &Path,
) -> Result<Vec<T>> {
    collector.join().map_err(|_| {
        anyhow::anyhow!(
            "file collector thread panicked while scanning {}",
            dir.display()
        )
    })
}

/// Returns true if the file name ends with any of the given suffixes.
///
/// This is a plain suffix test, so `.gn` matches both `BUILD.gn` and a file
/// named exactly `.gn`, but not `foo.gni`.
#[must_use]
pub fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| exts.iter().any(|ext| name.ends_with(ext.as_str())))
}

/// Finds every regular file under `root/dir` whose name ends with one of `exts`.
///
/// Returned paths are relative to `root`, sorted and unique. A missing `dir`
/// yields an empty list and a warning.
///
/// # Errors
///
/// Returns an error if an exclude pattern is not a valid glob, or if the
/// thread collecting results panics.
///
/// # Example
/// ```no_run
/// use repofmt::utility::fs::walk::{find_exts, WalkOptions};
/// use std::path::Path;
///
/// let exts = vec![".cc".to_string(), ".h".to_string()];
/// let files = find_exts(Path::new("/repo"), Path::new("src"), &exts, &WalkOptions::default())?;
/// println!("Found {} C++ files", files.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_exts(
    root: &Path,
    dir: &Path,
    exts: &[String],
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    let start = root.join(dir);
    if !start.is_dir() {
        warn!(dir = %start.display(), "directory does not exist, nothing to collect");
        return Ok(Vec::new());
    }

    let excludes = options.exclude_globs()?;

    // Bounded channel keeps memory flat on huge trees
    let (tx, rx) = bounded::<PathBuf>(1000);
    let error_count = AtomicUsize::new(0);

    let parallel = build_walker(&start, options).build_parallel();

    // The receiver is drained on this thread while the walkers send
    std::thread::scope(|scope| {
        let collector = scope.spawn(|| rx.iter().collect::<Vec<PathBuf>>());

        parallel.run(|| {
            let tx = tx.clone();
            let excludes = &excludes;
            let error_count = &error_count;

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        let is_file = entry.file_type().is_some_and(|ft| ft.is_file())
                            || (entry.path_is_symlink() && entry.path().is_file());
                        if !is_file || !has_extension(entry.path(), exts) {
                            return ignore::WalkState::Continue;
                        }

                        let relative = entry
                            .path()
                            .strip_prefix(root)
                            .unwrap_or_else(|_| entry.path())
                            .to_path_buf();

                        if excludes.iter().any(|glob| glob.is_match(relative.as_path())) {
                            return ignore::WalkState::Continue;
                        }

                        let _ = tx.send(relative);
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(tx);

        let mut files = join_collector(collector, &start)?;
        files.sort();
        files.dedup();

        debug!(
            dir = %dir.display(),
            exts = ?exts,
            files = files.len(),
            errors = error_count.load(Ordering::Relaxed),
            "collected files"
        );

        Ok(files)
    })
}
