// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Family configuration merging.
//!
//! ```text
//! FamilyConfig::builtin(kind) + FamilyOverride --> field-by-field merge
//! ```
//!
//! Only explicitly set fields (`Some`) in override replace base values.
//! The `env` table is merged key by key; every other field is replaced whole.
//! An empty `extra_args_env` or a zero `timeout_secs` clears the built-in value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::types::{FamilyConfig, InvocationMode};

/// Family configuration with optional fields for field-level merging.
///
/// All fields are optional to distinguish between "not set" (None) and
/// "explicitly set to value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FamilyOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// An empty string clears the built-in variable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args_env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirs: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prepend: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<InvocationMode>,
    /// Zero removes the limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Merge a family override over its built-in config.
pub(super) fn merge_family_config(
    base: &FamilyConfig,
    override_config: &FamilyOverride,
) -> FamilyConfig {
    let mut env = base.env.clone();
    if let Some(extra) = &override_config.env {
        env.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let extra_args_env = match &override_config.extra_args_env {
        Some(name) if name.is_empty() => None,
        Some(name) => Some(name.clone()),
        None => base.extra_args_env.clone(),
    };

    let timeout_secs = match override_config.timeout_secs {
        Some(0) => None,
        Some(secs) => Some(secs),
        None => base.timeout_secs,
    };

    FamilyConfig {
        enabled: override_config.enabled.unwrap_or(base.enabled),
        program: override_config
            .program
            .clone()
            .unwrap_or_else(|| base.program.clone()),
        args: override_config
            .args
            .clone()
            .unwrap_or_else(|| base.args.clone()),
        extra_args_env,
        dirs: override_config
            .dirs
            .clone()
            .unwrap_or_else(|| base.dirs.clone()),
        extensions: override_config
            .extensions
            .clone()
            .unwrap_or_else(|| base.extensions.clone()),
        files: override_config
            .files
            .clone()
            .unwrap_or_else(|| base.files.clone()),
        env,
        path_prepend: override_config
            .path_prepend
            .clone()
            .unwrap_or_else(|| base.path_prepend.clone()),
        mode: override_config.mode.unwrap_or(base.mode),
        timeout_secs,
    }
}
