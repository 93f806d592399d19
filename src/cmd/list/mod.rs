// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for repofmt.
//!
//! ```text
//! cxx     clang-format -i -style Google  (12 files)
//! build   disabled
//! ```


use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::cli::list::ListArgs;
use crate::config::Config;
use crate::config::types::{FamilyKind, InvocationMode};
use crate::error::Result;
use crate::format::{FileSet, FormatterTool, collect_files};

/// One family as shown by `list`.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyListing {
    pub family: FamilyKind,
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    pub mode: InvocationMode,
    pub file_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FileSet>,
}

/// Builds the listing for every family in run order.
///
/// Files are only collected for enabled families.
///
/// # Errors
///
/// Returns an error if file discovery fails for a family.
pub fn list_families(config: &Config, root: &Path, with_files: bool) -> Result<Vec<FamilyListing>> {
    let mut listings = Vec::new();
    for (kind, family) in config.families() {
        let files = if family.enabled {
            collect_files(root, &family, &config.walk)
                .with_context(|| format!("failed to collect files for family '{kind}'"))?
        } else {
            FileSet::default()
        };
        let tool = FormatterTool::from_config(kind, &family, root, files);

        listings.push(FamilyListing {
            family: kind,
            enabled: family.enabled,
            program: tool.program().to_string(),
            args: tool.args().to_vec(),
            mode: tool.mode(),
            file_count: tool.files().len(),
            files: with_files.then(|| tool.files().clone()),
        });
    }
    Ok(listings)
}

/// Renders listings as aligned text lines.
#[must_use]
pub fn render_text(listings: &[FamilyListing]) -> Vec<String> {
    let width = listings
        .iter()
        .map(|l| l.family.as_str().len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for listing in listings {
        let name = listing.family.as_str();
        if !listing.enabled {
            lines.push(format!("{name:<width$}  disabled"));
            continue;
        }

        let mut command = listing.program.clone();
        for arg in &listing.args {
            command.push(' ');
            command.push_str(arg);
        }
        let noun = if listing.file_count == 1 { "file" } else { "files" };
        let mode = match listing.mode {
            InvocationMode::Batch => String::new(),
            InvocationMode::PerFile => format!(", {}", listing.mode),
        };
        lines.push(format!(
            "{name:<width$}  {command}  ({} {noun}{mode})",
            listing.file_count
        ));

        if let Some(files) = &listing.files {
            lines.extend(files.iter().map(|f| format!("    {}", f.display())));
        }
    }
    lines
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if file discovery fails or the JSON output cannot be
/// serialized.
pub fn run_list_command(args: &ListArgs, config: &Config, root: &Path) -> Result<()> {
    let listings = list_families(config, root, args.files || args.json)?;

    if args.json {
        let json = serde_json::to_string_pretty(&listings).context("failed to serialize listing")?;
        println!("{json}");
    } else {
        for line in render_text(&listings) {
            println!("{line}");
        }
    }
    Ok(())
}
