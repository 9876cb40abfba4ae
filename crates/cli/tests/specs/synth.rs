// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ghr synth` specs

use crate::prelude::*;

#[test]
fn synth_writes_cloud_assembly() {
    let temp = Project::runners();
    temp.ghr()
        .args(&["synth"])
        .passes()
        .stdout_has("Synthesized runnerprod")
        .stdout_has("resources  15");

    assert!(temp.exists("ghr.out/runnerprod.template.json"));
    assert!(temp.exists("ghr.out/runnerprod.assets.json"));

    let manifest = temp.read_json("ghr.out/manifest.json");
    assert_eq!(manifest["artifacts"]["runnerprod"]["type"], "aws:cloudformation:stack");
    assert_eq!(
        manifest["artifacts"]["runnerprod"]["environment"],
        "aws://111111111111/us-east-1"
    );

    let template = temp.read_json("ghr.out/runnerprod.template.json");
    assert!(template["Resources"].get("runnerprodRepository").is_some());
    assert_eq!(
        template["Resources"]["runnerprodFargate"]["Properties"]["DesiredCount"],
        json!(3)
    );
}

#[test]
fn skip_container_build_writes_no_asset_manifest() {
    let temp = Project::runners();
    temp.ghr().args(&["synth", "-c", "config=dev"]).passes().stdout_has("none");

    assert!(temp.exists("ghr.out/runnerdev.template.json"));
    assert!(!temp.exists("ghr.out/runnerdev.assets.json"));
    let template = temp.read_json("ghr.out/runnerdev.template.json");
    assert!(template["Resources"].get("runnerdevRepository").is_none());
}

#[test]
fn synth_out_flag_redirects_assembly() {
    let temp = Project::runners();
    temp.ghr().args(&["synth", "--out", "cdk.out", "-c", "config=dev"]).passes();
    assert!(temp.exists("cdk.out/manifest.json"));
    assert!(!temp.exists("ghr.out"));
}

#[test]
fn synth_json_reports_published_image() {
    let temp = Project::runners();
    let json = temp.ghr().args(&["synth", "-o", "json"]).passes().json();
    assert_eq!(json["stack"], "runnerprod");
    assert_eq!(
        json["images"][0]["destination"],
        "111111111111.dkr.ecr.us-east-1.amazonaws.com/github-runner:1.0.0"
    );
}

#[test]
fn missing_build_context_fails_without_writing() {
    let temp = Project::empty();
    temp.context(&json!({ "config": "prod", "prod": valid_environment("prod") }));
    temp.ghr().args(&["synth"]).exits(1).stderr_has("docker");
    assert!(!temp.exists("ghr.out"));
}

#[test]
fn publishing_from_consumer_environment_is_config_error() {
    let temp = Project::empty();
    let mut dev = valid_environment("dev");
    dev["BuildParameters"]["skipContainerBuild"] = json!(false);
    temp.context(&json!({ "config": "dev", "dev": dev }));
    temp.ghr().args(&["synth"]).exits(2).stderr_has("dev");
    assert!(!temp.exists("ghr.out"));
}
