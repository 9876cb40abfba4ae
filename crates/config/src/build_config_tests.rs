// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{
    context_with_field, context_with_parameter, context_without_parameter, valid_context,
    valid_environment,
};
use serde_json::json;

const STRING_PARAMETERS: &[&str] = &[
    "buildEnvironment",
    "containerBuildPath",
    "ecrRepoName",
    "ecrSourceAccount",
    "organizationUrl",
    "runnerGroup",
    "taskCpu",
    "taskMem",
    "vpcId",
];

const ARRAY_PARAMETERS: &[&str] =
    &["availabilityZones", "baseImageAccessAccounts", "privateSubnetIds"];

const NUMBER_PARAMETERS: &[&str] = &["maxCpu", "maxMem", "taskCount", "taskMax", "taskMin"];

const TOP_LEVEL_STRINGS: &[&str] =
    &["App", "AWSAccountID", "AWSRegion", "Environment", "Team", "Version"];

#[test]
fn loads_fully_populated_record() {
    let config = load_config(&valid_context()).unwrap();

    assert_eq!(config.app, "runner");
    assert_eq!(config.aws_account_id, "111111111111");
    assert_eq!(config.aws_region, "us-east-1");
    assert_eq!(config.environment, "prod");
    assert_eq!(config.team, "infra");
    assert_eq!(config.version, "1.0.0");

    let p = &config.parameters;
    assert_eq!(p.availability_zones, vec!["us-east-1a", "us-east-1b"]);
    assert_eq!(p.base_image_access_accounts, vec!["222222222222", "333333333333"]);
    assert_eq!(p.build_environment, "prod");
    assert_eq!(p.container_build_path, "docker");
    assert_eq!(p.ecr_repo_name, "github-runner");
    assert_eq!(p.ecr_source_account, "111111111111");
    assert_eq!(p.max_cpu, 75.0);
    assert_eq!(p.max_mem, 80.0);
    assert_eq!(p.organization_url, "https://github.com/example-org");
    assert_eq!(p.private_subnet_ids, vec!["subnet-aaaa", "subnet-bbbb"]);
    assert_eq!(p.runner_group, "default");
    assert!(!p.skip_container_build);
    assert_eq!(p.task_count, 3);
    assert_eq!(p.task_cpu, "1024");
    assert_eq!(p.task_max, 6);
    assert_eq!(p.task_mem, "2048");
    assert_eq!(p.task_min, 1);
    assert_eq!(p.vpc_id, "vpc-0123456789abcdef0");
}

#[test]
fn strings_are_trimmed() {
    let mut context = context_with_field("App", json!("  runner  "));
    let mut env = context.get("prod").cloned().unwrap();
    env["BuildParameters"]["vpcId"] = json!("\tvpc-1\n");
    context.set("prod", env);

    let config = load_config(&context).unwrap();
    assert_eq!(config.app, "runner");
    assert_eq!(config.parameters.vpc_id, "vpc-1");
}

#[test]
fn missing_selector_is_distinct_error() {
    let mut context = Context::new();
    context.set("prod", valid_environment("prod"));

    let err = load_config(&context).unwrap_err();
    assert_eq!(err, ConfigError::MissingSelector("config"));
    assert_eq!(err.field(), None);
    assert!(err.to_string().contains("-c config=<env>"));
}

#[yare::parameterized(
    empty  = { json!("") },
    blank  = { json!("   ") },
    number = { json!(1) },
    null   = { Value::Null },
)]
fn unusable_selector_is_missing(selector: Value) {
    let mut context = valid_context();
    context.set("config", selector);
    assert_eq!(load_config(&context).unwrap_err(), ConfigError::MissingSelector("config"));
}

#[test]
fn selector_naming_unknown_environment() {
    let mut context = valid_context();
    context.set("config", json!("staging"));
    assert_eq!(
        load_config(&context).unwrap_err(),
        ConfigError::MissingEnvironment("staging".to_string())
    );
}

#[test]
fn selector_naming_non_mapping_entry() {
    let mut context = valid_context();
    context.set("config", json!("config"));
    assert_eq!(
        load_config(&context).unwrap_err(),
        ConfigError::MissingEnvironment("config".to_string())
    );
}

#[test]
fn numeric_string_task_count_is_type_error() {
    let err = load_config(&context_with_parameter("taskCount", json!("3"))).unwrap_err();
    assert_eq!(
        err,
        ConfigError::WrongType {
            field: "BuildParameters.taskCount".to_string(),
            expected: "a number"
        }
    );
    assert!(err.to_string().contains("taskCount"));
}

#[test]
fn string_true_skip_container_build_is_type_error() {
    let err = load_config(&context_with_parameter("skipContainerBuild", json!("true"))).unwrap_err();
    assert_eq!(err.field(), Some("BuildParameters.skipContainerBuild"));
    assert!(matches!(err, ConfigError::WrongType { expected: "a boolean", .. }));
}

#[test]
fn every_blank_string_parameter_is_rejected() {
    for key in STRING_PARAMETERS {
        let err = load_config(&context_with_parameter(key, json!("  "))).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingOrEmpty { field: format!("BuildParameters.{key}") },
            "blank {key} should be rejected"
        );
    }
}

#[test]
fn every_blank_top_level_string_is_rejected() {
    for key in TOP_LEVEL_STRINGS {
        let err = load_config(&context_with_field(key, json!(""))).unwrap_err();
        assert_eq!(err, ConfigError::MissingOrEmpty { field: key.to_string() });
    }
}

#[test]
fn every_empty_array_parameter_is_rejected() {
    for key in ARRAY_PARAMETERS {
        let err = load_config(&context_with_parameter(key, json!([]))).unwrap_err();
        assert_eq!(err, ConfigError::MissingOrEmpty { field: format!("BuildParameters.{key}") });
    }
}

#[test]
fn every_numeric_string_number_parameter_is_rejected() {
    for key in NUMBER_PARAMETERS {
        let err = load_config(&context_with_parameter(key, json!("10"))).unwrap_err();
        assert_eq!(
            err,
            ConfigError::WrongType { field: format!("BuildParameters.{key}"), expected: "a number" }
        );
    }
}

#[test]
fn every_absent_parameter_is_rejected() {
    let all = STRING_PARAMETERS
        .iter()
        .chain(ARRAY_PARAMETERS)
        .chain(NUMBER_PARAMETERS)
        .chain(&["skipContainerBuild"]);
    for key in all {
        let err = load_config(&context_without_parameter(key)).unwrap_err();
        assert_eq!(err, ConfigError::MissingOrEmpty { field: format!("BuildParameters.{key}") });
    }
}

#[test]
fn first_invalid_field_wins() {
    let mut env = valid_environment("prod");
    env["Team"] = json!("");
    env["BuildParameters"]["taskCount"] = json!("3");
    let mut context = Context::new();
    context.set("config", json!("prod"));
    context.set("prod", env);

    assert_eq!(
        load_config(&context).unwrap_err(),
        ConfigError::MissingOrEmpty { field: "Team".to_string() }
    );
}

#[test]
fn missing_build_parameters_record() {
    let mut env = valid_environment("prod");
    if let Some(fields) = env.as_object_mut() {
        fields.remove("BuildParameters");
    }
    let mut context = Context::new();
    context.set("config", json!("prod"));
    context.set("prod", env);

    assert_eq!(
        load_config(&context).unwrap_err(),
        ConfigError::MissingOrEmpty { field: "BuildParameters".to_string() }
    );
}

#[test]
fn fractional_task_count_is_rejected() {
    let err = load_config(&context_with_parameter("taskCount", json!(2.5))).unwrap_err();
    assert!(matches!(err, ConfigError::WrongType { expected: "a non-negative whole number", .. }));
}

#[test]
fn environments_lists_records_with_build_parameters() {
    let mut context = valid_context();
    context.set("dev", valid_environment("dev"));
    context.set("notes", json!({ "owner": "infra" }));
    context.set("region", json!("us-east-1"));

    assert_eq!(environments(&context), vec!["dev", "prod"]);
}

#[test]
fn derived_names_and_tags() {
    let config = BuildConfig::builder().app("gh").environment("dev").team("ci").build();
    assert_eq!(config.stack_name(), "ghdev");
    assert_eq!(config.prefix().hyphenated(), "gh-dev");

    let tags = config.tags();
    assert_eq!(tags.get("Service"), Some("gh"));
    assert_eq!(tags.get("Environment"), Some("dev"));
    assert_eq!(tags.get("Team"), Some("ci"));
}

#[test]
fn build_environment_matches_exactly() {
    let prod = BuildConfig::builder().environment("prod").build();
    assert!(prod.is_build_environment());

    let dev = BuildConfig::builder().environment("dev").build();
    assert!(!dev.is_build_environment());

    let near = BuildConfig::builder().environment("prod2").build();
    assert!(!near.is_build_environment());
}

#[test]
fn serializes_with_context_keys() {
    let config = load_config(&valid_context()).unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["App"], "runner");
    assert_eq!(json["AWSAccountID"], "111111111111");
    assert_eq!(json["BuildParameters"]["taskCount"], 3);
    assert_eq!(json["BuildParameters"]["skipContainerBuild"], false);
    assert_eq!(json["BuildParameters"]["privateSubnetIds"][1], "subnet-bbbb");
}
