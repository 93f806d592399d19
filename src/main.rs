// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> resolve root --> Config --> Logging --> Command Dispatch
//!   Fmt | List | Options | Configs | Version
//! ```

use std::path::Path;
use std::process::ExitCode;

use repofmt::cli::{self, Command};
use repofmt::cmd::config::{run_configs_command, run_options_command};
use repofmt::cmd::fmt::run_fmt_command;
use repofmt::cmd::list::run_list_command;
use repofmt::cmd::{config_loader, resolve_root};
use repofmt::config::Config;
use repofmt::config::types::GlobalConfig;
use repofmt::error::{Result, exit_status};
use repofmt::logging::{LogConfig, init_logging};

use anyhow::Context;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn run(cli: &cli::Cli) -> Result<()> {
    let command = cli.command();
    if command == Command::Version {
        handle_version_command();
        return Ok(());
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let root = resolve_root(cli.global.root.as_deref(), &cwd)?;

    let loader = config_loader(&cli.global, &root)?;
    let loaded_files = loader.format_loaded_files();
    let config = loader.build()?;

    let _log_guard = init_logging(&build_log_config(&config.global))
        .context("failed to initialize logging")?;
    tracing::debug!(root = %root.display(), "repository root");

    dispatch_command(&command, &config, &root, &loaded_files).await
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    let log_file = (!global.log_file.as_os_str().is_empty())
        .then(|| global.log_file.display().to_string());

    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(log_file)
        .build()
}

async fn dispatch_command(
    command: &Command,
    config: &Config,
    root: &Path,
    loaded_files: &[String],
) -> Result<()> {
    match command {
        Command::Fmt => run_fmt_command(config, root).await,
        Command::List(args) => run_list_command(args, config, root),
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Configs => {
            run_configs_command(loaded_files);
            Ok(())
        }
        Command::Version => {
            handle_version_command();
            Ok(())
        }
    }
}

fn handle_version_command() {
    println!("repofmt {}", env!("CARGO_PKG_VERSION"));
}
