// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal.
//!
//! ```text
//! walk:  find_exts()   ignore::WalkParallel (multi-core), suffix match
//!        WalkOptions   hidden, gitignore, skip_dirs, exclude globs
//! ```

pub mod walk;

#[cfg(test)]
mod tests;
