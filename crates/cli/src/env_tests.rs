// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn user_context_honours_override() {
    std::env::set_var(USER_CONTEXT_ENV, "/tmp/ghr-defaults.json");
    assert_eq!(user_context_path(), Some(PathBuf::from("/tmp/ghr-defaults.json")));
    std::env::remove_var(USER_CONTEXT_ENV);
}

#[test]
#[serial]
fn user_context_defaults_to_home() {
    std::env::remove_var(USER_CONTEXT_ENV);
    if let Some(home) = dirs::home_dir() {
        assert_eq!(user_context_path(), Some(home.join(".ghr.json")));
    }
}

#[test]
fn project_file_defaults_to_ghr_json() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(project_context_path(tmp.path()), tmp.path().join("ghr.json"));
}

#[yare::parameterized(
    toml = { &["ghr.toml"],              "ghr.toml" },
    hcl  = { &["ghr.hcl"],               "ghr.hcl" },
    cdk  = { &["cdk.json"],              "cdk.json" },
    json_first = { &["cdk.json", "ghr.json"], "ghr.json" },
    toml_over_cdk = { &["cdk.json", "ghr.toml"], "ghr.toml" },
)]
fn project_file_lookup_order(present: &[&str], expected: &str) {
    let tmp = TempDir::new().unwrap();
    for name in present {
        fs::write(tmp.path().join(name), "{}").unwrap();
    }
    assert_eq!(project_context_path(tmp.path()), tmp.path().join(expected));
}

#[test]
fn directories_named_like_context_files_are_skipped() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("ghr.json")).unwrap();
    fs::write(tmp.path().join("cdk.json"), "{}").unwrap();
    assert_eq!(project_context_path(tmp.path()), tmp.path().join("cdk.json"));
}
