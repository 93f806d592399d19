// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for environment variable management.
//!
//! ```text
//! EnvKey: OsString, compared the way the platform compares variable names
//!   windows   PATH == Path == path
//!   elsewhere PATH != path
//! ```

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

/// An environment variable name.
///
/// Names are case-insensitive on Windows and case-sensitive everywhere else,
/// so `http_proxy` and `HTTP_PROXY` stay distinct on Unix.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(OsString);

impl EnvKey {
    pub(super) fn new(s: impl Into<OsString>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_os_str(&self) -> &OsStr {
        &self.0
    }

    #[cfg(windows)]
    fn comparable(&self) -> Cow<'_, OsStr> {
        Cow::Owned(self.0.to_ascii_lowercase())
    }

    #[cfg(not(windows))]
    fn comparable(&self) -> Cow<'_, OsStr> {
        Cow::Borrowed(&self.0)
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.comparable() == other.comparable()
    }
}

impl std::hash::Hash for EnvKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.comparable().hash(state);
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.comparable().cmp(&other.comparable())
    }
}
