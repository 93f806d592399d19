// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable container.

use super::types::EnvKey;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::Path;

#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

/// A set of environment variables handed to a formatter process.
///
/// Names and values are kept as `OsString`, so variables that are not valid
/// UTF-8 pass through to the formatter unchanged.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: BTreeMap<EnvKey, OsString>,
}

impl Env {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Creates an environment from `(name, value)` pairs.
    ///
    /// A later pair replaces an earlier one with the same name.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (EnvKey::new(k), v.into()))
                .collect(),
        }
    }

    /// Sets an environment variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> &mut Self {
        // An existing key keeps its spelling, so a Windows `Path` stays `Path`
        self.vars.insert(EnvKey::new(key), value.into());
        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars
            .get(&EnvKey::new(key.as_ref()))
            .map(OsString::as_os_str)
    }

    /// Prepends a directory to `PATH`.
    pub fn prepend_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let mut new_path = path.as_ref().as_os_str().to_os_string();
        if let Some(current) = self.get("PATH").filter(|p| !p.is_empty()) {
            new_path.push(PATH_SEPARATOR);
            new_path.push(current);
        }
        self.set("PATH", new_path)
    }

    /// Returns an iterator over environment variables, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}
