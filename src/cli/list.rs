// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `list` command arguments.

use clap::Args;

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ListArgs {
    /// Prints every file each family would format.
    #[arg(short = 'f', long)]
    pub files: bool,

    /// Prints the listing as JSON.
    #[arg(long)]
    pub json: bool,
}
