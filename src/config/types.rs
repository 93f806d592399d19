// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for repofmt.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, WalkOptions, families.<name> -> FamilyOverride
//! FamilyKind: cxx | build | python | web | rust (canonical run order)
//! FamilyConfig = builtin(kind) + FamilyOverride
//! ```
//!
//! # Invocation Mode
//!
//! ```text
//! InvocationMode: batch (default, one call with every file) | per-file
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Language family routed to one external formatter.
///
/// The set is closed. Declaration order is the run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Cxx,
    Build,
    Python,
    Web,
    Rust,
}

impl FamilyKind {
    /// Every family, in run order.
    pub const ALL: [Self; 5] = [Self::Cxx, Self::Build, Self::Python, Self::Web, Self::Rust];

    /// Canonical lowercase name, as used in `[families.<name>]`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cxx => "cxx",
            Self::Build => "build",
            Self::Python => "python",
            Self::Web => "web",
            Self::Rust => "rust",
        }
    }

    /// Comma-separated list of the canonical names.
    #[must_use]
    pub fn expected_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FamilyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownFamily {
                name: s.to_string(),
                expected: Self::expected_names(),
            })
    }
}

/// How a formatter receives its file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationMode {
    /// One invocation with every file appended.
    #[default]
    Batch,
    /// One invocation per file.
    PerFile,
}

impl std::fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Batch => write!(f, "batch"),
            Self::PerFile => write!(f, "per-file"),
        }
    }
}

impl std::str::FromStr for InvocationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batch" => Ok(Self::Batch),
            "per-file" | "per_file" | "perfile" => Ok(Self::PerFile),
            _ => Err(ConfigError::InvalidValue {
                section: "families".to_string(),
                key: "mode".to_string(),
                message: format!("expected 'batch' or 'per-file', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log formatter command lines instead of running them.
    pub dry: bool,
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables the file log.
    pub log_file: PathBuf,
    /// Repair symlinks checked out as plain files before formatting.
    pub fix_symlinks: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
            fix_symlinks: true,
        }
    }
}

/// Fully resolved configuration of one formatter family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Whether the family runs at all.
    pub enabled: bool,
    /// Formatter executable. Contains a path separator: relative to the root.
    /// Bare name: looked up through `PATH`.
    pub program: String,
    /// Flags placed before the file list.
    pub args: Vec<String>,
    /// Environment variable whose whitespace-split value follows `args`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args_env: Option<String>,
    /// Directories, relative to the root, scanned for `extensions`.
    pub dirs: Vec<PathBuf>,
    /// File name suffixes selected in `dirs`.
    pub extensions: Vec<String>,
    /// Explicit files, relative to the root, always included when present.
    pub files: Vec<PathBuf>,
    /// Extra environment variables for the formatter.
    pub env: BTreeMap<String, String>,
    /// Directories, relative to the root, prepended to `PATH`.
    pub path_prepend: Vec<PathBuf>,
    pub mode: InvocationMode,
    /// Seconds each formatter invocation may run before it is killed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

impl FamilyConfig {
    /// Returns the built-in configuration of a family.
    #[must_use]
    pub fn builtin(kind: FamilyKind) -> Self {
        let base = Self {
            enabled: true,
            program: String::new(),
            args: Vec::new(),
            extra_args_env: None,
            dirs: Vec::new(),
            extensions: Vec::new(),
            files: Vec::new(),
            env: BTreeMap::new(),
            path_prepend: Vec::new(),
            mode: InvocationMode::Batch,
            timeout_secs: None,
        };

        match kind {
            FamilyKind::Cxx => Self {
                program: "clang-format".to_string(),
                args: strings(&["-i", "-style", "Google"]),
                dirs: paths(&["src"]),
                extensions: strings(&[".cc", ".h"]),
                ..base
            },
            FamilyKind::Build => Self {
                program: "third_party/depot_tools/gn".to_string(),
                args: strings(&["format"]),
                dirs: paths(&["build_extra"]),
                extensions: strings(&[".gn", ".gni"]),
                files: paths(&["BUILD.gn", ".gn"]),
                env: BTreeMap::from([("DEPOT_TOOLS_WIN_TOOLCHAIN".to_string(), "0".to_string())]),
                path_prepend: paths(&["third_party/depot_tools"]),
                ..base
            },
            FamilyKind::Python => Self {
                program: "yapf".to_string(),
                args: strings(&["-i"]),
                dirs: paths(&["tools", "build_extra"]),
                extensions: strings(&[".py"]),
                ..base
            },
            FamilyKind::Web => Self {
                program: "node".to_string(),
                args: strings(&["third_party/node_modules/prettier/bin-prettier.js", "--write"]),
                dirs: paths(&["js"]),
                extensions: strings(&[".js", ".ts"]),
                files: paths(&["tsconfig.json", "tslint.json"]),
                ..base
            },
            FamilyKind::Rust => Self {
                program: "rustfmt".to_string(),
                args: strings(&[
                    "--config-path",
                    "tools/rustfmt.toml",
                    "--error-on-unformatted",
                    "--write-mode",
                    "overwrite",
                ]),
                extra_args_env: Some("RUSTFMT_FLAGS".to_string()),
                dirs: paths(&["src"]),
                extensions: strings(&[".rs"]),
                ..base
            },
        }
    }
}
