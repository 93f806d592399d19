// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::list::ListArgs;
use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_no_command_defaults_to_fmt() {
    let cli = Cli::try_parse_from(["repofmt"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.command(), Command::Fmt);
}

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["repofmt", "version"]).unwrap();
    assert_eq!(cli.command(), Command::Version);
}

#[test]
fn test_parse_list_flags() {
    let cli = Cli::try_parse_from(["repofmt", "list", "--files", "--json"]).unwrap();
    assert_eq!(
        cli.command(),
        Command::List(ListArgs {
            files: true,
            json: true,
        })
    );

    let cli = Cli::try_parse_from(["repofmt", "list", "-f"]).unwrap();
    assert_eq!(
        cli.command(),
        Command::List(ListArgs {
            files: true,
            json: false,
        })
    );
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "repofmt",
        "-r",
        "/src/repo",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--no-default-config",
        "-l",
        "4",
        "--dry",
        "fmt",
    ])
    .unwrap();

    assert_eq!(cli.command(), Command::Fmt);
    assert_eq!(cli.global.root, Some(PathBuf::from("/src/repo")));
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(cli.global.no_default_config);
    assert!(cli.global.dry);
    assert_eq!(cli.global.log_level, Some(4));
}

#[test]
fn test_log_level_out_of_range_rejected() {
    assert!(Cli::try_parse_from(["repofmt", "-l", "6"]).is_err());
    assert!(Cli::try_parse_from(["repofmt", "--file-log-level", "9"]).is_err());
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["repofmt", "build"]).is_err());
}

#[test]
fn test_config_overrides_order() {
    let cli = Cli::try_parse_from([
        "repofmt",
        "-s",
        "families/rust/enabled=false",
        "--set",
        "global/dry=false",
        "-l",
        "2",
        "--log-file",
        "out/repofmt.log",
        "--dry",
    ])
    .unwrap();

    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "families/rust/enabled=false",
        "global/dry=false",
        "global/output_log_level=2",
        "global/file_log_level=2",
        "global/log_file=out/repofmt.log",
        "global/dry=true",
    ]
    "#);
}

#[test]
fn test_file_log_level_overrides_console_level() {
    let cli = Cli::try_parse_from(["repofmt", "-l", "1", "--file-log-level", "5"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert_eq!(
        overrides,
        vec![
            "global/output_log_level=1".to_string(),
            "global/file_log_level=5".to_string(),
        ]
    );
}

#[test]
fn test_no_flags_no_overrides() {
    let cli = Cli::try_parse_from(["repofmt", "options"]).unwrap();
    assert!(cli.global.to_config_overrides().is_empty());
    assert_eq!(cli.command(), Command::Options);
}
