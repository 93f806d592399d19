// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git repository helpers.
//!
//! ```text
//!   root.rs            symlinks.rs
//!   discover_root()    fix_symlinks() / repair_symlinks()
//!        \                 /
//!         v               v
//!        gix (pure Rust, no subprocess, read-only except
//!             for rewriting work-tree symlinks)
//! ```

pub mod root;
pub mod symlinks;


pub use root::discover_root;
pub use symlinks::{SymlinkReport, fix_symlinks, repair_symlinks};
