// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed runner configuration and the loader that validates it.

use crate::context::Context;
use crate::error::ConfigError;
use crate::verify::{
    verify_array, verify_bool, verify_count, verify_number, verify_record, verify_string, Record,
};
use ghr_core::{StackPrefix, TagSet};
use serde::Serialize;
use serde_json::Value;

/// Context key naming the environment record to load.
pub const SELECTOR_KEY: &str = "config";

/// Key of the nested parameters record inside an environment record.
pub const PARAMETERS_KEY: &str = "BuildParameters";

/// One application/environment pairing, validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildConfig {
    #[serde(rename = "App")]
    pub app: String,
    #[serde(rename = "AWSAccountID")]
    pub aws_account_id: String,
    #[serde(rename = "AWSRegion")]
    pub aws_region: String,
    #[serde(rename = "Environment")]
    pub environment: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "BuildParameters")]
    pub parameters: BuildParameters,
}

/// Environment-specific tunables. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildParameters {
    pub availability_zones: Vec<String>,
    pub base_image_access_accounts: Vec<String>,
    pub build_environment: String,
    pub container_build_path: String,
    pub ecr_repo_name: String,
    pub ecr_source_account: String,
    /// CPU utilization percent the service scales towards.
    pub max_cpu: f64,
    /// Memory utilization percent the service scales towards.
    pub max_mem: f64,
    pub organization_url: String,
    pub private_subnet_ids: Vec<String>,
    pub runner_group: String,
    pub skip_container_build: bool,
    /// Desired replica count.
    pub task_count: u32,
    /// Task CPU units, e.g. `"1024"`.
    pub task_cpu: String,
    pub task_max: u32,
    /// Task memory in MiB, e.g. `"2048"`.
    pub task_mem: String,
    pub task_min: u32,
    pub vpc_id: String,
}

impl BuildConfig {
    pub fn prefix(&self) -> StackPrefix {
        StackPrefix::new(&self.app, &self.environment)
    }

    /// `{App}{Environment}`
    pub fn stack_name(&self) -> String {
        self.prefix().joined()
    }

    /// Whether this environment owns the image repository.
    pub fn is_build_environment(&self) -> bool {
        self.environment == self.parameters.build_environment
    }

    /// `Service`/`Environment`/`Team` ownership tags.
    pub fn tags(&self) -> TagSet {
        let mut tags = TagSet::new();
        tags.insert("Service", &self.app);
        tags.insert("Environment", &self.environment);
        tags.insert("Team", &self.team);
        tags
    }
}

/// Name of the environment the `config` selector points at.
pub fn selected_environment(context: &Context) -> Result<String, ConfigError> {
    match context.get(SELECTOR_KEY) {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err(ConfigError::MissingSelector(SELECTOR_KEY)),
    }
}

/// Load and validate the environment named by the `config` selector.
///
/// Fields are checked in declaration order and the first failure is returned.
pub fn load_config(context: &Context) -> Result<BuildConfig, ConfigError> {
    let name = selected_environment(context)?;
    let env_fields = match context.get(&name) {
        Some(Value::Object(fields)) => fields,
        _ => return Err(ConfigError::MissingEnvironment(name)),
    };
    let env = Record::new(env_fields);

    let app = verify_string(&env, "App")?;
    let aws_account_id = verify_string(&env, "AWSAccountID")?;
    let aws_region = verify_string(&env, "AWSRegion")?;
    let environment = verify_string(&env, "Environment")?;
    let team = verify_string(&env, "Team")?;
    let version = verify_string(&env, "Version")?;

    let params = verify_record(&env, PARAMETERS_KEY)?;
    let parameters = BuildParameters {
        availability_zones: verify_array(&params, "availabilityZones")?,
        base_image_access_accounts: verify_array(&params, "baseImageAccessAccounts")?,
        build_environment: verify_string(&params, "buildEnvironment")?,
        container_build_path: verify_string(&params, "containerBuildPath")?,
        ecr_repo_name: verify_string(&params, "ecrRepoName")?,
        ecr_source_account: verify_string(&params, "ecrSourceAccount")?,
        max_cpu: verify_number(&params, "maxCpu")?,
        max_mem: verify_number(&params, "maxMem")?,
        organization_url: verify_string(&params, "organizationUrl")?,
        private_subnet_ids: verify_array(&params, "privateSubnetIds")?,
        runner_group: verify_string(&params, "runnerGroup")?,
        skip_container_build: verify_bool(&params, "skipContainerBuild")?,
        task_count: verify_count(&params, "taskCount")?,
        task_cpu: verify_string(&params, "taskCpu")?,
        task_max: verify_count(&params, "taskMax")?,
        task_mem: verify_string(&params, "taskMem")?,
        task_min: verify_count(&params, "taskMin")?,
        vpc_id: verify_string(&params, "vpcId")?,
    };

    tracing::info!(selector = %name, app = %app, environment = %environment, "loaded config");

    Ok(BuildConfig { app, aws_account_id, aws_region, environment, team, version, parameters })
}

/// Names of the context entries that look like environment records
/// (a mapping with a `BuildParameters` mapping), sorted.
pub fn environments(context: &Context) -> Vec<String> {
    let mut names: Vec<String> = context
        .keys()
        .filter(|key| {
            matches!(
                context.get(key),
                Some(Value::Object(fields)) if matches!(fields.get(PARAMETERS_KEY), Some(Value::Object(_)))
            )
        })
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

ghr_core::builder! {
    pub struct BuildParametersBuilder => BuildParameters {
        into {
            availability_zones: Vec<String> = vec!["us-east-1a".to_string(), "us-east-1b".to_string()],
            base_image_access_accounts: Vec<String> = vec!["222222222222".to_string()],
            build_environment: String = "prod",
            container_build_path: String = "docker",
            ecr_repo_name: String = "github-runner",
            ecr_source_account: String = "111111111111",
            organization_url: String = "https://github.com/example-org",
            private_subnet_ids: Vec<String> = vec!["subnet-aaaa".to_string(), "subnet-bbbb".to_string()],
            runner_group: String = "default",
            task_cpu: String = "1024",
            task_mem: String = "2048",
            vpc_id: String = "vpc-0123456789abcdef0",
        }
        set {
            max_cpu: f64 = 75.0,
            max_mem: f64 = 80.0,
            skip_container_build: bool = false,
            task_count: u32 = 2,
            task_max: u32 = 4,
            task_min: u32 = 1,
        }
    }
}

ghr_core::builder! {
    pub struct BuildConfigBuilder => BuildConfig {
        into {
            app: String = "runner",
            aws_account_id: String = "111111111111",
            aws_region: String = "us-east-1",
            environment: String = "prod",
            team: String = "infra",
            version: String = "1.0.0",
        }
        set {
            parameters: BuildParameters = BuildParameters::builder().build(),
        }
    }
}

#[cfg(test)]
#[path = "build_config_tests.rs"]
mod tests;
