// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const JSON_CONTEXT: &str = r#"{
  "config": "prod",
  "prod": { "App": "runner", "BuildParameters": { "taskCount": 3 } }
}"#;

const CDK_JSON: &str = r#"{
  "app": "npx ts-node index.ts",
  "context": {
    "prod": { "App": "runner" }
  }
}"#;

const TOML_CONTEXT: &str = r#"
config = "prod"

[prod]
App = "runner"

[prod.BuildParameters]
taskCount = 3
skipContainerBuild = true
availabilityZones = ["us-east-1a", "us-east-1b"]
"#;

const HCL_CONTEXT: &str = r#"
config = "prod"

prod {
  App = "runner"
  BuildParameters {
    taskCount          = 3
    skipContainerBuild = true
    availabilityZones  = ["us-east-1a", "us-east-1b"]
  }
}
"#;

#[yare::parameterized(
    json    = { "ghr.json",   Some(Format::Json) },
    toml    = { "ghr.toml",   Some(Format::Toml) },
    hcl     = { "ghr.hcl",    Some(Format::Hcl) },
    yaml    = { "ghr.yaml",   None },
    no_ext  = { "ghr",        None },
)]
fn format_from_extension(name: &str, expected: Option<Format>) {
    assert_eq!(format_for_path(Path::new(name)), expected);
}

#[test]
fn parses_json() {
    let context = Context::parse(JSON_CONTEXT, Format::Json, "inline").unwrap();
    assert_eq!(context.get("config"), Some(&json!("prod")));
    assert_eq!(context.get("prod").unwrap()["BuildParameters"]["taskCount"], 3);
}

#[test]
fn unwraps_cdk_json_context() {
    let context = Context::parse(CDK_JSON, Format::Json, "cdk.json").unwrap();
    assert_eq!(context.get("prod").unwrap()["App"], "runner");
    assert!(context.get("app").is_none());
}

#[test]
fn keeps_non_mapping_context_key() {
    let context = Context::parse(r#"{"context": "plain"}"#, Format::Json, "inline").unwrap();
    assert_eq!(context.get("context"), Some(&json!("plain")));
}

#[test]
fn parses_toml_with_typed_values() {
    let context = Context::parse(TOML_CONTEXT, Format::Toml, "ghr.toml").unwrap();
    let params = &context.get("prod").unwrap()["BuildParameters"];
    assert!(params["taskCount"].is_number());
    assert_eq!(params["skipContainerBuild"], true);
    assert_eq!(params["availabilityZones"][1], "us-east-1b");
}

#[test]
fn parses_hcl_blocks_as_mappings() {
    let context = Context::parse(HCL_CONTEXT, Format::Hcl, "ghr.hcl").unwrap();
    assert_eq!(context.get("config"), Some(&json!("prod")));
    let params = &context.get("prod").unwrap()["BuildParameters"];
    assert!(params["taskCount"].is_number());
    assert_eq!(params["skipContainerBuild"], true);
}

#[test]
fn rejects_non_mapping_document() {
    let err = Context::parse("[1, 2]", Format::Json, "list.json").unwrap_err();
    assert!(matches!(err, ContextError::NotAMapping(ref loc) if loc == "list.json"));
}

#[test]
fn parse_error_names_location_and_format() {
    let err = Context::parse("{ not json", Format::Json, "broken.json").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("invalid JSON in broken.json"), "got: {message}");
}

#[test]
fn merge_overrides_top_level_keys() {
    let mut base = Context::new();
    base.set("config", json!("dev"));
    base.set("dev", json!({ "App": "a" }));

    let mut overlay = Context::new();
    overlay.set("config", json!("prod"));

    base.merge(overlay);
    assert_eq!(base.get("config"), Some(&json!("prod")));
    assert!(base.get("dev").is_some());
    assert_eq!(base.len(), 2);
}

#[yare::parameterized(
    simple      = { "config=prod",        "config", "prod" },
    spaced_key  = { " config =prod",      "config", "prod" },
    empty_value = { "config=",            "config", "" },
    equals      = { "url=https://a?b=c",  "url",    "https://a?b=c" },
)]
fn pair_splits_on_first_equals(pair: &str, key: &str, value: &str) {
    assert_eq!(parse_pair(pair).unwrap(), (key.to_string(), value.to_string()));
}

#[yare::parameterized(
    no_equals = { "config" },
    no_key    = { "=prod" },
    blank_key = { "  =prod" },
)]
fn pair_without_key_is_rejected(pair: &str) {
    assert!(matches!(parse_pair(pair), Err(ContextError::InvalidPair(_))));
}

#[test]
fn read_missing_file_is_none() {
    let tmp = TempDir::new().unwrap();
    assert!(read_context_file(&tmp.path().join("ghr.json")).unwrap().is_none());
}

#[test]
fn read_unsupported_extension_is_error() {
    let tmp = TempDir::new().unwrap();
    let err = read_context_file(&tmp.path().join("ghr.yaml")).unwrap_err();
    assert!(matches!(err, ContextError::UnsupportedFormat(_)));
}

#[test]
fn loader_layers_user_project_and_pairs() {
    let tmp = TempDir::new().unwrap();
    let user = tmp.path().join("user.json");
    let project = tmp.path().join("ghr.json");
    fs::write(&user, r#"{ "config": "dev", "shared": "user", "dev": {} }"#).unwrap();
    fs::write(&project, r#"{ "config": "staging", "shared": "project" }"#).unwrap();

    let context = ContextLoader::new()
        .user_file(&user)
        .project_file(&project)
        .pairs(["config=prod"])
        .load()
        .unwrap();

    assert_eq!(context.get("config"), Some(&json!("prod")));
    assert_eq!(context.get("shared"), Some(&json!("project")));
    assert!(context.get("dev").is_some());
}

#[test]
fn loader_tolerates_missing_files() {
    let tmp = TempDir::new().unwrap();
    let context = ContextLoader::new()
        .user_file(tmp.path().join("absent-user.json"))
        .project_file(tmp.path().join("absent.json"))
        .pairs(["config=prod"])
        .load()
        .unwrap();
    assert_eq!(context.len(), 1);
}

#[test]
fn loader_reports_invalid_pair() {
    let err = ContextLoader::new().pairs(["config"]).load().unwrap_err();
    assert_eq!(err.to_string(), "invalid context pair 'config'; expected key=value");
}

#[test]
fn loader_reports_unparseable_project_file() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("ghr.toml");
    fs::write(&project, "config = ").unwrap();

    let err = ContextLoader::new().project_file(&project).load().unwrap_err();
    assert!(matches!(err, ContextError::Parse { format: Format::Toml, .. }));
}
