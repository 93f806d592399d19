// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repofmt using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! repofmt [global options] [command]
//! fmt                      (default)
//! list [--files] [--json]
//! options
//! configs
//! version
//! ```

pub mod global;
pub mod list;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::list::ListArgs;
use clap::{Parser, Subcommand};

/// Repository Formatting Orchestrator
///
/// Runs one external formatter per language family over a repository.
#[derive(Debug, Parser)]
#[command(
    name = "repofmt",
    author,
    version,
    about = "Repository Formatting Orchestrator",
    long_about = "repofmt Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Formats a repository by running clang-format, gn format, yapf,\n\
                  prettier and rustfmt over their files, one family after the\n\
                  other. Invoking `repofmt` with no command formats everything.\n\
                  See `repofmt <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  Built-in defaults are overridden by `repofmt.toml` in the repository\n\
                  root, then by every --config file in order, then by REPOFMT_*\n\
                  environment variables (e.g. REPOFMT_GLOBAL__DRY=true), then by --set\n\
                  and the other command-line flags. Use --no-default-config to skip\n\
                  `repofmt.toml`.\n\n\
                  Extra rustfmt flags are read from RUSTFMT_FLAGS."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Command to run, `fmt` when none was given.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Fmt)
    }
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Formats every enabled family (default).
    Fmt,

    /// Lists the families with their formatter and files.
    List(ListArgs),

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
