// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Context fixtures for tests in this and downstream crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::Context;
use serde_json::{json, Value};

/// A complete, well-typed `BuildParameters` record.
pub fn valid_parameters() -> Value {
    json!({
        "availabilityZones": ["us-east-1a", "us-east-1b"],
        "baseImageAccessAccounts": ["222222222222", "333333333333"],
        "buildEnvironment": "prod",
        "containerBuildPath": "docker",
        "ecrRepoName": "github-runner",
        "ecrSourceAccount": "111111111111",
        "maxCpu": 75,
        "maxMem": 80,
        "organizationUrl": "https://github.com/example-org",
        "privateSubnetIds": ["subnet-aaaa", "subnet-bbbb"],
        "runnerGroup": "default",
        "skipContainerBuild": false,
        "taskCount": 3,
        "taskCpu": "1024",
        "taskMax": 6,
        "taskMem": "2048",
        "taskMin": 1,
        "vpcId": "vpc-0123456789abcdef0"
    })
}

/// A complete environment record named `environment`.
pub fn valid_environment(environment: &str) -> Value {
    json!({
        "App": "runner",
        "AWSAccountID": "111111111111",
        "AWSRegion": "us-east-1",
        "Environment": environment,
        "Team": "infra",
        "Version": "1.0.0",
        "BuildParameters": valid_parameters()
    })
}

/// Context with a `prod` record selected by `config=prod`.
pub fn valid_context() -> Context {
    let mut context = Context::new();
    context.set("config", json!("prod"));
    context.set("prod", valid_environment("prod"));
    context
}

/// Context whose `prod` record has `BuildParameters.<key>` replaced by `value`.
pub fn context_with_parameter(key: &str, value: Value) -> Context {
    let mut env = valid_environment("prod");
    env["BuildParameters"][key] = value;
    let mut context = Context::new();
    context.set("config", json!("prod"));
    context.set("prod", env);
    context
}

/// Context whose `prod` record has top-level `<key>` replaced by `value`.
pub fn context_with_field(key: &str, value: Value) -> Context {
    let mut env = valid_environment("prod");
    env[key] = value;
    let mut context = Context::new();
    context.set("config", json!("prod"));
    context.set("prod", env);
    context
}

/// Context whose `prod` record lacks `BuildParameters.<key>`.
pub fn context_without_parameter(key: &str) -> Context {
    let mut env = valid_environment("prod");
    if let Some(params) = env["BuildParameters"].as_object_mut() {
        params.remove(key);
    }
    let mut context = Context::new();
    context.set("config", json!("prod"));
    context.set("prod", env);
    context
}
