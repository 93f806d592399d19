// repofmt: Repository Formatting Orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::walk::{WalkOptions, find_exts, has_extension, join_collector};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, "").expect("write file");
}

fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn render(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_find_exts_selects_exact_suffixes() {
    let temp = temp_dir();
    touch(temp.path(), "src/main.cc");
    touch(temp.path(), "src/main.h");
    touch(temp.path(), "src/nested/deep/util.cc");
    touch(temp.path(), "src/readme.md");
    touch(temp.path(), "src/main.hpp");
    touch(temp.path(), "src/main.cc.orig");
    touch(temp.path(), "tools/outside.cc");

    let files = find_exts(
        temp.path(),
        Path::new("src"),
        &exts(&[".cc", ".h"]),
        &WalkOptions::default(),
    )
    .expect("walk should succeed");

    insta::assert_snapshot!(render(&files), @r"
    src/main.cc
    src/main.h
    src/nested/deep/util.cc
    ");
}

#[test]
fn test_find_exts_missing_dir_is_empty() {
    let temp = temp_dir();

    let files = find_exts(
        temp.path(),
        Path::new("does/not/exist"),
        &exts(&[".py"]),
        &WalkOptions::default(),
    )
    .expect("a missing directory is not an error");

    assert!(files.is_empty());
}

#[test]
fn test_find_exts_includes_hidden_by_default() {
    let temp = temp_dir();
    touch(temp.path(), "build_extra/.gn");
    touch(temp.path(), "build_extra/.hidden/rules.gni");
    touch(temp.path(), "build_extra/BUILD.gn");

    let files = find_exts(
        temp.path(),
        Path::new("build_extra"),
        &exts(&[".gn", ".gni"]),
        &WalkOptions::default(),
    )
    .expect("walk should succeed");

    insta::assert_snapshot!(render(&files), @r"
    build_extra/.gn
    build_extra/.hidden/rules.gni
    build_extra/BUILD.gn
    ");
}

#[test]
fn test_find_exts_hidden_excluded_on_request() {
    let temp = temp_dir();
    touch(temp.path(), "tools/.cache/gen.py");
    touch(temp.path(), "tools/format.py");

    let options = WalkOptions::builder().with_include_hidden(false).build();
    let files = find_exts(temp.path(), Path::new("tools"), &exts(&[".py"]), &options)
        .expect("walk should succeed");

    insta::assert_snapshot!(render(&files), @"tools/format.py");
}

#[test]
fn test_find_exts_skip_dirs() {
    let temp = temp_dir();
    touch(temp.path(), "js/main.ts");
    touch(temp.path(), "js/node_modules/dep/index.js");
    touch(temp.path(), "js/lib/node_modules.js");

    let options = WalkOptions::builder()
        .with_skip_dirs(vec!["node_modules".to_string()])
        .build();
    let files = find_exts(temp.path(), Path::new("js"), &exts(&[".js", ".ts"]), &options)
        .expect("walk should succeed");

    insta::assert_snapshot!(render(&files), @r"
    js/lib/node_modules.js
    js/main.ts
    ");
}

#[test]
fn test_find_exts_exclude_globs() {
    let temp = temp_dir();
    touch(temp.path(), "src/lib.rs");
    touch(temp.path(), "src/generated/bindings.rs");
    touch(temp.path(), "src/generated/more/ffi.rs");

    let options = WalkOptions::builder()
        .with_exclude(vec!["src/generated/**".to_string()])
        .build();
    let files = find_exts(temp.path(), Path::new("src"), &exts(&[".rs"]), &options)
        .expect("walk should succeed");

    insta::assert_snapshot!(render(&files), @"src/lib.rs");
}

#[test]
fn test_find_exts_invalid_exclude_glob() {
    let temp = temp_dir();
    touch(temp.path(), "src/lib.rs");

    let options = WalkOptions::builder()
        .with_exclude(vec!["src/{unclosed".to_string()])
        .build();
    let err = find_exts(temp.path(), Path::new("src"), &exts(&[".rs"]), &options)
        .expect_err("invalid glob should fail");

    assert!(err.to_string().contains("src/{unclosed"));
}

#[test]
fn test_find_exts_respects_gitignore_when_enabled() {
    let temp = temp_dir();
    touch(temp.path(), "src/kept.rs");
    touch(temp.path(), "src/ignored.rs");
    std::fs::write(temp.path().join("src/.gitignore"), "ignored.rs\n").expect("write gitignore");

    let plain = find_exts(
        temp.path(),
        Path::new("src"),
        &exts(&[".rs"]),
        &WalkOptions::default(),
    )
    .expect("walk should succeed");
    assert_eq!(plain.len(), 2, "gitignore is not consulted by default");

    let options = WalkOptions::builder().with_respect_gitignore(true).build();
    let filtered = find_exts(temp.path(), Path::new("src"), &exts(&[".rs"]), &options)
        .expect("walk should succeed");
    insta::assert_snapshot!(render(&filtered), @"src/kept.rs");
}

#[test]
fn test_find_exts_single_thread_matches_parallel() {
    let temp = temp_dir();
    for i in 0..50 {
        touch(temp.path(), &format!("src/m{}/f{i}.cc", i % 7));
    }

    let parallel = find_exts(
        temp.path(),
        Path::new("src"),
        &exts(&[".cc"]),
        &WalkOptions::default(),
    )
    .expect("walk should succeed");
    let single = find_exts(
        temp.path(),
        Path::new("src"),
        &exts(&[".cc"]),
        &WalkOptions::builder().with_threads(1).build(),
    )
    .expect("walk should succeed");

    assert_eq!(parallel.len(), 50);
    assert_eq!(parallel, single);
}

#[test]
fn test_has_extension_is_a_name_suffix_match() {
    let gn = exts(&[".gn"]);
    let cases = [
        ("BUILD.gn", has_extension(Path::new("BUILD.gn"), &gn)),
        (".gn", has_extension(Path::new(".gn"), &gn)),
        ("dir/foo.gni", has_extension(Path::new("dir/foo.gni"), &gn)),
        ("dir.gn/file", has_extension(Path::new("dir.gn/file"), &gn)),
    ];
    insta::assert_debug_snapshot!(cases, @r#"
    [
        (
            "BUILD.gn",
            true,
        ),
        (
            ".gn",
            true,
        ),
        (
            "dir/foo.gni",
            false,
        ),
        (
            "dir.gn/file",
            false,
        ),
    ]
    "#);
}

#[test]
fn test_walk_options_defaults() {
    let options = WalkOptions::default();
    assert!(options.include_hidden());
    assert!(!options.respect_gitignore());
    assert!(!options.follow_links());
    assert!(options.threads().is_none());
    assert!(options.skip_dirs().is_empty());
    assert!(options.exclude().is_empty());
}

#[test]
fn test_collector_panic_is_an_error() {
    let dir = Path::new("/repo/src");
    let result = std::thread::scope(|scope| {
        let collector = scope.spawn(|| -> Vec<PathBuf> { panic!("collector failed") });
        join_collector(collector, dir)
    });

    let err = result.expect_err("a panicked collector must not look like an empty directory");
    insta::assert_snapshot!(
        err.to_string(),
        @"file collector thread panicked while scanning /repo/src"
    );
}

#[test]
fn test_collector_result_is_returned() {
    let files = std::thread::scope(|scope| {
        let collector = scope.spawn(|| vec![PathBuf::from("src/a.cc")]);
        join_collector(collector, Path::new("src"))
    })
    .expect("collector succeeds");
    assert_eq!(files, [PathBuf::from("src/a.cc")]);
}
