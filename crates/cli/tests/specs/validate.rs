// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ghr validate` specs

use crate::prelude::*;

#[test]
fn validate_summarizes_selected_environment() {
    let temp = Project::runners();
    temp.ghr()
        .args(&["validate"])
        .passes()
        .stdout_has("runnerprod is valid")
        .stdout_has("aws://111111111111/us-east-1")
        .stdout_has("github-runner (owned)");
}

#[test]
fn validate_pair_overrides_file_selector() {
    let temp = Project::runners();
    temp.ghr()
        .args(&["validate", "-c", "config=dev"])
        .passes()
        .stdout_has("runnerdev is valid")
        .stdout_has("skipped")
        .stdout_lacks("(owned)");
}

#[test]
fn validate_json_carries_config() {
    let temp = Project::runners();
    let json = temp.ghr().args(&["validate", "-o", "json"]).passes().json();
    assert_eq!(json["stack"], "runnerprod");
    assert_eq!(json["resources"], 15);
    assert_eq!(json["config"]["BuildParameters"]["taskCount"], 3);
    assert_eq!(json["image"], "111111111111.dkr.ecr.us-east-1.amazonaws.com/github-runner:1.0.0");
}

#[test]
fn missing_selector_is_config_error() {
    let temp = Project::empty();
    temp.context(&json!({ "prod": valid_environment("prod") }));
    temp.ghr().args(&["validate"]).exits(2).stderr_has("-c config=<env>");
}

#[test]
fn unknown_environment_is_config_error() {
    let temp = Project::runners();
    temp.ghr().args(&["validate", "-c", "config=staging"]).exits(2).stderr_has("staging");
}

#[test]
fn numeric_string_task_count_is_config_error() {
    let temp = Project::empty();
    let mut prod = valid_environment("prod");
    prod["BuildParameters"]["taskCount"] = json!("3");
    temp.context(&json!({ "config": "prod", "prod": prod }));
    temp.ghr().args(&["validate"]).exits(2).stderr_has("taskCount");
}

#[test]
fn malformed_pair_is_config_error() {
    let temp = Project::runners();
    temp.ghr().args(&["validate", "-c", "config"]).exits(2).stderr_has("invalid context pair");
}

#[test]
fn context_file_replaces_project_file() {
    let temp = Project::runners();
    temp.file("runners.toml", "config = \"dev\"\n");
    temp.ghr()
        .args(&["validate", "--context-file", "runners.toml"])
        .exits(2)
        .stderr_has("dev");
}

#[test]
fn user_defaults_fill_in_selector() {
    let temp = Project::empty();
    temp.context(&json!({ "prod": valid_environment("prod") }));
    temp.file("defaults.json", r#"{ "config": "prod" }"#);
    let defaults = temp.path().join("defaults.json");
    temp.ghr()
        .env("GHR_USER_CONTEXT", defaults.to_str().unwrap())
        .args(&["validate"])
        .passes()
        .stdout_has("runnerprod is valid");
}

#[test]
fn missing_context_file_is_config_error() {
    let temp = Project::runners();
    temp.ghr()
        .args(&["validate", "--context-file", "absent.toml"])
        .exits(2)
        .stderr_has("context file absent.toml not found");
}

#[test]
fn log_filter_sends_events_to_stderr_only() {
    let temp = Project::runners();
    let quiet = temp.ghr().args(&["validate"]).passes().stdout();

    let logged = temp.ghr().env("GHR_LOG", "debug").args(&["validate"]).passes();
    let logged = logged.stderr_has("loaded config").stderr_has("declared resource");
    similar_asserts::assert_eq!(logged.stdout(), quiet);
}

#[test]
fn default_log_filter_hides_info_events() {
    let temp = Project::runners();
    let run = temp.ghr().args(&["validate"]).passes();
    assert!(!run.stderr().contains("loaded config"), "stderr: {}", run.stderr());
}
