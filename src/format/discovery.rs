// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File discovery for one formatter family.
//!
//! ```text
//! family.dirs  --find_exts(extensions)--.
//!                                        +--> FileSet (root-relative, sorted, unique)
//! family.files --exists?-----------------'
//! ```

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::types::FamilyConfig;
use crate::error::Result;
use crate::utility::fs::walk::{WalkOptions, find_exts};

/// Repository-relative paths handed to one formatter, sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileSet {
    files: Vec<PathBuf>,
}

impl FileSet {
    #[must_use]
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut files: Vec<PathBuf> = files.into_iter().collect();
        files.sort();
        files.dedup();
        Self { files }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

/// Collects every file a family formats.
///
/// Union of `find_exts` over the family's directories plus its explicit files
/// that exist. A missing explicit file is skipped with a warning.
///
/// # Errors
///
/// Returns an error if a directory walk fails (e.g. an invalid exclude glob).
pub fn collect_files(root: &Path, family: &FamilyConfig, walk: &WalkOptions) -> Result<FileSet> {
    let mut files = Vec::new();

    for dir in &family.dirs {
        let found = find_exts(root, dir, &family.extensions, walk)
            .with_context(|| format!("failed to scan {}", dir.display()))?;
        files.extend(found);
    }

    for file in &family.files {
        if root.join(file).is_file() {
            files.push(file.clone());
        } else {
            warn!(file = %file.display(), "explicit file does not exist, skipping");
        }
    }

    Ok(FileSet::new(files))
}
