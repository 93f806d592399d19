// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::merge::{FamilyOverride, merge_family_config};
use super::types::{FamilyConfig, FamilyKind, InvocationMode};
use super::{Config, ConfigLoader};
use crate::error::{ConfigError, RepofmtError};
use crate::logging::LogLevel;
use std::path::PathBuf;

fn config_error(err: &anyhow::Error) -> Option<&ConfigError> {
    err.chain().find_map(|cause| match cause.downcast_ref::<RepofmtError>()? {
        RepofmtError::Config(inner) => Some(inner.as_ref()),
        _ => None,
    })
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert!(config.global.fix_symlinks);
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert!(config.walk.include_hidden());
    assert!(!config.walk.respect_gitignore());
    assert!(config.families.is_empty());
}

#[test]
fn test_family_kind_order_and_names() {
    let names: Vec<&str> = FamilyKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(names, ["cxx", "build", "python", "web", "rust"]);

    let mut sorted = FamilyKind::ALL;
    sorted.sort();
    assert_eq!(sorted, FamilyKind::ALL, "Ord follows run order");
}

#[test]
fn test_family_kind_parse() {
    assert_eq!("rust".parse::<FamilyKind>().ok(), Some(FamilyKind::Rust));
    assert_eq!("CXX".parse::<FamilyKind>().ok(), Some(FamilyKind::Cxx));

    let err = "go".parse::<FamilyKind>().expect_err("go is not a family");
    insta::assert_snapshot!(
        err.to_string(),
        @"unknown formatter family 'go' (expected one of: cxx, build, python, web, rust)"
    );
}

#[test]
fn test_invocation_mode_parse_and_display() {
    assert_eq!(
        "per-file".parse::<InvocationMode>().ok(),
        Some(InvocationMode::PerFile)
    );
    assert_eq!("Batch".parse::<InvocationMode>().ok(), Some(InvocationMode::Batch));
    assert!("sometimes".parse::<InvocationMode>().is_err());
    assert_eq!(InvocationMode::PerFile.to_string(), "per-file");
    assert_eq!(InvocationMode::default(), InvocationMode::Batch);
}

#[test]
fn test_builtin_families() {
    let config = Config::default();
    let rendered: Vec<String> = config
        .families()
        .into_iter()
        .map(|(kind, family)| {
            format!(
                "{kind}: {} {} | dirs={:?} exts={:?} files={:?}",
                family.program,
                family.args.join(" "),
                family.dirs,
                family.extensions,
                family.files
            )
        })
        .collect();

    insta::assert_snapshot!(rendered.join("\n"), @r#"
    cxx: clang-format -i -style Google | dirs=["src"] exts=[".cc", ".h"] files=[]
    build: third_party/depot_tools/gn format | dirs=["build_extra"] exts=[".gn", ".gni"] files=["BUILD.gn", ".gn"]
    python: yapf -i | dirs=["tools", "build_extra"] exts=[".py"] files=[]
    web: node third_party/node_modules/prettier/bin-prettier.js --write | dirs=["js"] exts=[".js", ".ts"] files=["tsconfig.json", "tslint.json"]
    rust: rustfmt --config-path tools/rustfmt.toml --error-on-unformatted --write-mode overwrite | dirs=["src"] exts=[".rs"] files=[]
    "#);
}

#[test]
fn test_builtin_build_family_environment() {
    let build = FamilyConfig::builtin(FamilyKind::Build);
    assert_eq!(
        build.env.get("DEPOT_TOOLS_WIN_TOOLCHAIN").map(String::as_str),
        Some("0")
    );
    assert_eq!(build.path_prepend, [PathBuf::from("third_party/depot_tools")]);
    assert_eq!(build.mode, InvocationMode::Batch);

    let rust = FamilyConfig::builtin(FamilyKind::Rust);
    assert_eq!(rust.extra_args_env.as_deref(), Some("RUSTFMT_FLAGS"));
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[walk]
skip_dirs = ["node_modules"]

[families.rust]
enabled = false

[families.build]
mode = "per-file"
"#;

    let config = Config::parse(toml).expect("config should parse");
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.walk.skip_dirs(), ["node_modules"]);
    assert!(!config.family_config(FamilyKind::Rust).enabled);
    assert_eq!(
        config.family_config(FamilyKind::Build).mode,
        InvocationMode::PerFile
    );
    assert!(config.family_config(FamilyKind::Cxx).enabled);
}

#[test]
fn test_unknown_family_rejected() {
    let err = Config::parse("[families.golang]\nprogram = \"gofmt\"")
        .expect_err("unknown family should be rejected");

    assert!(matches!(
        config_error(&err),
        Some(ConfigError::UnknownFamily { name, .. }) if name == "golang"
    ));
}

#[test]
fn test_empty_program_rejected() {
    let err = Config::parse("[families.python]\nprogram = \"\"")
        .expect_err("empty program should be rejected");
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'program' in section '[families.python]': program must not be empty"
    );
}

#[test]
fn test_empty_program_allowed_when_disabled() {
    let config = Config::parse("[families.python]\nenabled = false\nprogram = \"\"")
        .expect("a disabled family needs no program");
    assert!(!config.family_config(FamilyKind::Python).enabled);
}

#[test]
fn test_invalid_exclude_glob_rejected() {
    let err = Config::parse("[walk]\nexclude = [\"src/{a\"]")
        .expect_err("invalid glob should be rejected");
    assert!(err.to_string().contains("src/{a"));
}

#[test]
fn test_deny_unknown_fields_top_level() {
    let result = Config::parse("[formatters]\nfoo = 1");
    assert!(result.is_err(), "unknown top-level section should fail");
}

#[test]
fn test_deny_unknown_fields_in_family() {
    let result = Config::parse("[families.cxx]\nstyle = \"LLVM\"");
    assert!(result.is_err(), "unknown family key should fail");
}

#[test]
fn test_merge_family_config_partial_override() {
    let base = FamilyConfig::builtin(FamilyKind::Cxx);
    let override_config = FamilyOverride {
        program: Some("clang-format-18".to_string()),
        ..Default::default()
    };

    let merged = merge_family_config(&base, &override_config);
    assert_eq!(merged.program, "clang-format-18");
    assert_eq!(merged.args, base.args, "unset fields keep the built-in value");
    assert_eq!(merged.dirs, base.dirs);
    assert!(merged.enabled);
}

#[test]
fn test_merge_family_config_env_is_merged_by_key() {
    let base = FamilyConfig::builtin(FamilyKind::Build);
    let override_config = FamilyOverride {
        env: Some(
            [("GN_EXTRA".to_string(), "1".to_string())]
                .into_iter()
                .collect(),
        ),
        ..Default::default()
    };

    let merged = merge_family_config(&base, &override_config);
    let keys: Vec<&str> = merged.env.keys().map(String::as_str).collect();
    assert_eq!(keys, ["DEPOT_TOOLS_WIN_TOOLCHAIN", "GN_EXTRA"]);
}

#[test]
fn test_merge_family_config_clears_extra_args_env() {
    let base = FamilyConfig::builtin(FamilyKind::Rust);

    let cleared = merge_family_config(
        &base,
        &FamilyOverride {
            extra_args_env: Some(String::new()),
            ..Default::default()
        },
    );
    assert!(cleared.extra_args_env.is_none());

    let renamed = merge_family_config(
        &base,
        &FamilyOverride {
            extra_args_env: Some("MY_RUSTFMT".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(renamed.extra_args_env.as_deref(), Some("MY_RUSTFMT"));
}

#[test]
fn test_merge_family_config_full_override() {
    let base = FamilyConfig::builtin(FamilyKind::Web);
    let override_config = FamilyOverride {
        enabled: Some(false),
        program: Some("prettier".to_string()),
        args: Some(vec!["--write".to_string()]),
        extra_args_env: Some("PRETTIER_FLAGS".to_string()),
        dirs: Some(vec![PathBuf::from("web")]),
        extensions: Some(vec![".tsx".to_string()]),
        files: Some(Vec::new()),
        env: None,
        path_prepend: Some(vec![PathBuf::from("node_modules/.bin")]),
        mode: Some(InvocationMode::PerFile),
        timeout_secs: Some(120),
    };

    let merged = merge_family_config(&base, &override_config);
    assert_eq!(
        merged,
        FamilyConfig {
            enabled: false,
            program: "prettier".to_string(),
            args: vec!["--write".to_string()],
            extra_args_env: Some("PRETTIER_FLAGS".to_string()),
            dirs: vec![PathBuf::from("web")],
            extensions: vec![".tsx".to_string()],
            files: Vec::new(),
            env: base.env.clone(),
            path_prepend: vec![PathBuf::from("node_modules/.bin")],
            mode: InvocationMode::PerFile,
            timeout_secs: Some(120),
        }
    );
}

#[test]
fn test_merge_family_config_timeout() {
    let base = FamilyConfig::builtin(FamilyKind::Python);
    assert_eq!(base.timeout_secs, None);

    let limited = merge_family_config(
        &base,
        &FamilyOverride {
            timeout_secs: Some(30),
            ..Default::default()
        },
    );
    assert_eq!(limited.timeout_secs, Some(30));

    let cleared = merge_family_config(
        &limited,
        &FamilyOverride {
            timeout_secs: Some(0),
            ..Default::default()
        },
    );
    assert_eq!(cleared.timeout_secs, None, "zero removes the limit");

    let config = Config::parse("[families.python]\ntimeout_secs = 45").expect("config should parse");
    assert_eq!(config.family_config(FamilyKind::Python).timeout_secs, Some(45));
    assert!(
        config
            .format_options()
            .iter()
            .any(|line| line.starts_with("families.python.timeout_secs") && line.ends_with("= 45"))
    );
}

#[test]
fn test_family_table_name_is_case_insensitive() {
    let config = Config::parse("[families.Rust]\nenabled = false").expect("config should parse");
    assert!(!config.family_config(FamilyKind::Rust).enabled);
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::default();
    let first = config.format_options();
    let second = config.format_options();
    assert_eq!(first, second);

    let keys: Vec<&str> = first
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted, "options are sorted by key");
}

#[test]
fn test_format_options_family_lines() {
    let config = Config::parse("[families.rust]\nargs = [\"--edition\", \"2021\"]")
        .expect("config should parse");
    let options = config.format_options();

    let rust: Vec<String> = options
        .iter()
        .filter(|line| line.starts_with("families.rust."))
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    insta::assert_snapshot!(rust.join("\n"), @r"
    families.rust.args = --edition 2021
    families.rust.dirs = src
    families.rust.enabled = true
    families.rust.extensions = .rs
    families.rust.extra_args_env = RUSTFMT_FLAGS
    families.rust.mode = batch
    families.rust.program = rustfmt
    ");
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new().add_toml_str("[global]\n dry = true");

    let files: Vec<String> = loader
        .loaded_files()
        .iter()
        .map(|(source, path)| format!("{source}:{}", path.display()))
        .collect();
    insta::assert_snapshot!(files.join("\n"), @"string:<string>");
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\n dry = true")
        .add_toml_str("[walk]\n follow_links = true");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [string] <string>
    2. [string] <string>
    ");
}

#[test]
fn test_config_loader_optional_only_tracks_existing() {
    let loader = ConfigLoader::new().add_toml_file_optional("/nonexistent/repofmt.toml");
    assert!(loader.loaded_files().is_empty());

    let config = loader.build().expect("a missing optional file is fine");
    assert!(!config.global.dry);
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let result = ConfigLoader::new()
        .add_toml_file("/nonexistent/repofmt.toml")
        .build();
    assert!(result.is_err(), "a missing required file should fail");
}

#[test]
fn test_config_loader_add_toml_file_invalid_toml() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "[global\ndry = ").expect("failed to write");

    let result = ConfigLoader::new().add_toml_file(file.path()).build();
    assert!(result.is_err(), "build should fail with invalid TOML");
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test
    unsafe {
        std::env::set_var("REPOFMTTEST_GLOBAL__FIX_SYMLINKS", "false");
        std::env::set_var("REPOFMTTEST_FAMILIES__CXX__PROGRAM", "clang-format-17");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[global]\n fix_symlinks = true")
        .with_env_prefix("REPOFMTTEST")
        .build()
        .expect("build should succeed");

    assert!(!config.global.fix_symlinks, "env var should override TOML value");
    assert_eq!(config.family_config(FamilyKind::Cxx).program, "clang-format-17");

    // SAFETY: Same as above
    unsafe {
        std::env::remove_var("REPOFMTTEST_GLOBAL__FIX_SYMLINKS");
        std::env::remove_var("REPOFMTTEST_FAMILIES__CXX__PROGRAM");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\n dry = false")
        .set("global.dry", true)
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert!(config.global.dry, "set override should take effect");
}

#[test]
fn test_config_loader_set_path() {
    let config = ConfigLoader::new()
        .set_path("families/web/enabled=false")
        .expect("set should succeed")
        .set_path("walk.follow_links = true")
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert!(!config.family_config(FamilyKind::Web).enabled);
    assert!(config.walk.follow_links());
}

#[test]
fn test_config_loader_set_path_requires_pair() {
    for bad in ["families/web/enabled", "=true"] {
        let result = ConfigLoader::new().set_path(bad);
        assert!(result.is_err(), "'{bad}' should be rejected");
    }
}

#[test]
fn test_config_loader_layered_sources() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[global]
dry = false
fix_symlinks = false

[families.cxx]
program = "clang-format-16"
"#
    )
    .expect("failed to write");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .add_toml_str(
            r#"
[global]
dry = true

[families.cxx]
args = ["-i"]
"#,
        )
        .build()
        .expect("build should succeed");

    assert!(config.global.dry, "string should override file");
    assert!(!config.global.fix_symlinks, "file value should persist");

    let cxx = config.family_config(FamilyKind::Cxx);
    assert_eq!(cxx.program, "clang-format-16", "file value should persist");
    assert_eq!(cxx.args, ["-i"], "string should add new value");
}

#[test]
fn test_config_loader_build_deserialization_error() {
    let err = ConfigLoader::new()
        .add_toml_str("[global]\n dry = \"not a boolean\"")
        .build()
        .expect_err("build should fail with type mismatch");

    let message = format!("{err:#}");
    assert!(
        message.contains("dry") || message.contains("invalid type"),
        "error should mention the problematic field: {message}"
    );
}
