// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repofmt.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. built-in family defaults
//! 2. <root>/repofmt.toml (optional)
//! 3. --config FILE (repeatable)
//! 4. REPOFMT_* env vars
//! 5. --set KEY=VAL, then CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPOFMT_GLOBAL__DRY=true              → global.dry = true
//! REPOFMT_WALK__RESPECT_GITIGNORE=true  → walk.respect_gitignore = true
//! REPOFMT_FAMILIES__RUST__ENABLED=false → families.rust.enabled = false
//! ```
//!
//! # Family Overrides
//!
//! ```toml
//! [families.cxx]
//! program = "third_party/depot_tools/clang-format"
//!
//! [families.build]
//! mode = "per-file"
//! ```

pub mod loader;
pub mod merge;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, RepofmtError, Result};
use crate::utility::fs::walk::WalkOptions;

use loader::ConfigLoader;
use merge::FamilyOverride;
use types::{FamilyConfig, FamilyKind, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Directory traversal options shared by every family.
    pub walk: WalkOptions,
    /// Per-family overrides of the built-in formatter setup.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub families: BTreeMap<String, FamilyOverride>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repofmt::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("repofmt.toml")
    ///     .with_env_prefix("REPOFMT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Returns the override table for a family, if configured.
    ///
    /// Table names are matched case-insensitively.
    fn family_override(&self, kind: FamilyKind) -> Option<&FamilyOverride> {
        self.families
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(kind.as_str()))
            .map(|(_, config)| config)
    }

    /// Get the resolved configuration of one family.
    ///
    /// Built-in defaults with the `[families.<name>]` override merged on top.
    #[must_use]
    pub fn family_config(&self, kind: FamilyKind) -> FamilyConfig {
        let base = FamilyConfig::builtin(kind);
        match self.family_override(kind) {
            Some(config) => merge::merge_family_config(&base, config),
            None => base,
        }
    }

    /// Every family with its resolved configuration, in run order.
    #[must_use]
    pub fn families(&self) -> Vec<(FamilyKind, FamilyConfig)> {
        FamilyKind::ALL
            .into_iter()
            .map(|kind| (kind, self.family_config(kind)))
            .collect()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A `[families.<name>]` table names an unknown family.
    /// - An enabled family has an empty program.
    /// - An extension is empty.
    /// - A `walk.exclude` pattern is not a valid glob.
    pub fn validate(&self) -> Result<()> {
        for name in self.families.keys() {
            name.parse::<FamilyKind>().map_err(RepofmtError::from)?;
        }

        for (kind, family) in self.families() {
            if family.enabled && family.program.trim().is_empty() {
                return Err(RepofmtError::from(ConfigError::InvalidValue {
                    section: format!("families.{kind}"),
                    key: "program".to_string(),
                    message: "program must not be empty".to_string(),
                })
                .into());
            }
            if family.extensions.iter().any(String::is_empty) {
                return Err(RepofmtError::from(ConfigError::InvalidValue {
                    section: format!("families.{kind}"),
                    key: "extensions".to_string(),
                    message: "extensions must not be empty strings".to_string(),
                })
                .into());
            }
        }

        self.walk.exclude_globs()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_walk_options(&mut options);
        self.format_family_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
        options.insert(
            "global.fix_symlinks".into(),
            self.global.fix_symlinks.to_string(),
        );
    }

    fn format_walk_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "walk.include_hidden".into(),
            self.walk.include_hidden().to_string(),
        );
        options.insert(
            "walk.respect_gitignore".into(),
            self.walk.respect_gitignore().to_string(),
        );
        options.insert(
            "walk.follow_links".into(),
            self.walk.follow_links().to_string(),
        );
        options.insert("walk.skip_dirs".into(), self.walk.skip_dirs().join(" "));
        options.insert("walk.exclude".into(), self.walk.exclude().join(" "));
    }

    fn format_family_options(&self, options: &mut BTreeMap<String, String>) {
        let join_paths = |paths: &[std::path::PathBuf]| {
            paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };

        for (kind, family) in self.families() {
            let key = |field: &str| format!("families.{kind}.{field}");
            options.insert(key("enabled"), family.enabled.to_string());
            options.insert(key("program"), family.program.clone());
            options.insert(key("args"), family.args.join(" "));
            if let Some(var) = &family.extra_args_env {
                options.insert(key("extra_args_env"), var.clone());
            }
            options.insert(key("dirs"), join_paths(&family.dirs));
            options.insert(key("extensions"), family.extensions.join(" "));
            if !family.files.is_empty() {
                options.insert(key("files"), join_paths(&family.files));
            }
            for (var, value) in &family.env {
                options.insert(key(&format!("env.{var}")), value.clone());
            }
            if !family.path_prepend.is_empty() {
                options.insert(key("path_prepend"), join_paths(&family.path_prepend));
            }
            options.insert(key("mode"), family.mode.to_string());
            if let Some(secs) = family.timeout_secs {
                options.insert(key("timeout_secs"), secs.to_string());
            }
        }
    }
}
