// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! ```text
//! Env (BTreeMap<EnvKey, OsString>)
//! Sources: current_env(), Env::new(), Env::from_vars()
//! Ops: set/get/prepend_path
//! ```
//!
//! - **Platform key rules**: case-insensitive on Windows only
//! - **Lossless**: non-UTF-8 names and values are kept as they are
//! - **Deterministic order** for logging and tests

pub mod container;
mod types;


/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    container::Env::from_vars(std::env::vars_os())
}

/// Reads a variable holding extra command-line flags and splits it on whitespace.
///
/// An unset or non-UTF-8 variable yields no flags.
#[must_use]
pub fn split_flags_var(name: &str) -> Vec<String> {
    std::env::var(name)
        .map(|value| split_flags(&value))
        .unwrap_or_default()
}

/// Splits a flag string on whitespace.
#[must_use]
pub fn split_flags(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
