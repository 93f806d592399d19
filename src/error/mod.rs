// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          RepofmtError (~24 bytes)
//!                 |
//!   +------+------+------+------+------+
//!   |      |      |      |      |      |
//!   v      v      v      v      v      v
//!  Cfg   Proc    Fs    Git    Io    Other
//!  Box   Box    Box    Box    Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, MissingKey, InvalidValue, UnknownFamily
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout, Interrupted
//!   Fs       NotFound, IoError
//!   Git      RepoNotFound, BareRepository, Index
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RepofmtError`].
pub type RepofmtResult<T> = std::result::Result<T, RepofmtError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum RepofmtError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Git repository error.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl RepofmtError {
    /// Exit code of the formatter that caused this error, if any.
    ///
    /// Only [`ProcessError::NonZeroExit`] carries one.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process(err) => match err.as_ref() {
                ProcessError::NonZeroExit { code, .. } => Some(*code),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Process exit code for a failed run.
///
/// The failing formatter's own code, clamped to `1..=255`, when the chain
/// holds a [`ProcessError::NonZeroExit`]; `1` otherwise.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.chain()
        .filter_map(|e| e.downcast_ref::<RepofmtError>())
        .find_map(RepofmtError::exit_code)
        .map_or(1, |code| u8::try_from(code.clamp(1, 255)).unwrap_or(1))
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RepofmtError {
                fn from(err: $error) -> Self {
                    RepofmtError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    GitError => Git,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `[families.<name>]` table names a family that does not exist.
    #[error("unknown formatter family '{name}' (expected one of: {expected})")]
    UnknownFamily { name: String, expected: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-zero code.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Process was killed because the run was cancelled.
    #[error("process '{command}' was interrupted")]
    Interrupted { command: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Git Errors ---

/// Git repository errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository contains the given path.
    #[error("no git repository found at or above '{path}'")]
    RepoNotFound { path: String },

    /// Repository has no work tree.
    #[error("repository at '{path}' has no worktree (bare repository)")]
    BareRepository { path: String },

    /// Failed to read the repository index.
    #[error("failed to read index of '{path}': {message}")]
    Index { path: String, message: String },
}
