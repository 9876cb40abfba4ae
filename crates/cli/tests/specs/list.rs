// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ghr list` specs

use crate::prelude::*;

#[test]
fn list_marks_selected_environment() {
    let temp = Project::runners();
    temp.ghr()
        .args(&["list"])
        .passes()
        .stdout_has("* prod")
        .stdout_has("  dev")
        .stdout_has("111111111111/us-east-1");
}

#[test]
fn list_without_context_says_so() {
    cli().args(&["list"]).passes().stdout_eq("No environments in context\n");
}

#[test]
fn list_json_is_array() {
    let temp = Project::runners();
    let json = temp.ghr().args(&["list", "-o", "json"]).passes().json();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["dev", "prod"]);
    assert_eq!(json[1]["selected"], true);
}

#[test]
fn list_ignores_invalid_records() {
    let temp = Project::empty();
    let mut broken = valid_environment("broken");
    broken["BuildParameters"]["taskCount"] = json!("three");
    temp.context(&json!({ "broken": broken }));
    temp.ghr().args(&["list"]).passes().stdout_has("broken");
}
