// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declaration of the runner stack from a validated [`BuildConfig`].
//!
//! Each step declares its resources and returns handles to them; later
//! steps take those handles as arguments. Nothing here performs I/O.

use crate::assets::{ImageAsset, ImagePublish, BUILD_DATE_ARG};
use crate::error::StackError;
use crate::fargate::TaskSize;
use crate::resources::autoscaling::{PredefinedMetric, ScalableTargetProps, ScalingPolicyProps};
use crate::resources::ecr::{build_repository, registry_uri, RepositoryParams, RepositoryRef};
use crate::resources::ecs::{
    build_container, build_service, build_task_definition, CapacityProviderAssociationsProps,
    ClusterProps, ContainerParams, LogConfiguration, ServiceParams, TaskDefinitionParams,
};
use crate::resources::iam::{self, PolicyDocument, PolicyProps, PolicyStatement, RoleProps};
use crate::resources::logs::LogGroupProps;
use crate::resources::network::{SecurityGroupProps, VpcPlacement};
use crate::resources::secrets::SecretProps;
use crate::stack::{Stack, StackEnv};
use crate::template::{Expr, Output, Properties, RemovalPolicy, Resource};
use chrono::{DateTime, SecondsFormat, Utc};
use ghr_config::{BuildConfig, BuildParameters};
use ghr_core::{Clock, LogicalId, StackPrefix};
use std::path::PathBuf;

/// Images kept in the repository before the oldest expire.
pub const REPOSITORY_MAX_IMAGES: u32 = 10;

pub const LOG_RETENTION_DAYS: u32 = 7;

/// Region of the registry runner tasks pull their image from.
pub const IMAGE_REGISTRY_REGION: &str = "us-east-1";

pub const ECS_TASKS_PRINCIPAL: &str = "ecs-tasks.amazonaws.com";

/// Inputs to declaration that do not come from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareOptions {
    /// Directory `containerBuildPath` is resolved against.
    pub project_dir: PathBuf,
    /// Value of the `BUILD_DATE` image build argument.
    pub build_date: String,
}

impl DeclareOptions {
    pub fn new(project_dir: impl Into<PathBuf>, clock: &impl Clock) -> Self {
        Self { project_dir: project_dir.into(), build_date: build_date(clock) }
    }

    ghr_core::setters! {
        into {
            project_dir: PathBuf,
            build_date: String,
        }
    }
}

/// RFC 3339 timestamp of the clock's current time.
pub fn build_date(clock: &impl Clock) -> String {
    let millis = i64::try_from(clock.epoch_ms()).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Declare every resource of the runner stack for `config`.
pub fn declare_runner_stack(
    config: &BuildConfig,
    options: &DeclareOptions,
) -> Result<Stack, StackError> {
    let params = &config.parameters;
    let prefix = config.prefix();
    let mut stack = Stack::new(
        config.stack_name(),
        StackEnv::new(&config.aws_account_id, &config.aws_region),
        config.tags(),
    );

    let repository = if config.is_build_environment() {
        Some(declare_repository(&mut stack, config, &prefix)?)
    } else {
        None
    };
    if !params.skip_container_build {
        let repository =
            repository.as_ref().ok_or_else(|| StackError::PublishWithoutRepository {
                environment: config.environment.clone(),
                build_environment: params.build_environment.clone(),
            })?;
        declare_image_publish(&mut stack, config, options, &prefix, repository)?;
    }

    let vpc = VpcPlacement::from_attributes(
        &params.vpc_id,
        &params.availability_zones,
        &params.private_subnet_ids,
    )?;

    let log_group = stack.add(
        &prefix.construct_id("Logs"),
        Resource::new(Properties::LogGroup(LogGroupProps::new(prefix.joined(), LOG_RETENTION_DAYS)))
            .removal_policy(RemovalPolicy::Delete),
    )?;

    let security_group_id = prefix.construct_id("SecurityGroup");
    let security_group = stack.add(
        &security_group_id,
        Resource::new(Properties::SecurityGroup(SecurityGroupProps::outbound_only(
            &security_group_id,
            &format!("{}/{}", config.stack_name(), security_group_id),
            &vpc,
        ))),
    )?;

    let secret_id = prefix.construct_id("GitHubSecret");
    let secret = stack.add(
        &secret_id,
        Resource::new(Properties::Secret(SecretProps::new(&secret_id)))
            .removal_policy(RemovalPolicy::Delete),
    )?;

    let cluster = declare_cluster(&mut stack, &prefix)?;
    let roles = declare_task_roles(&mut stack, &prefix, &log_group, &secret)?;
    let task_definition =
        declare_task_definition(&mut stack, config, &prefix, &roles, &log_group, &secret)?;

    let service = stack.add(
        &prefix.construct_id("Fargate"),
        Resource::new(Properties::Service(build_service(ServiceParams {
            name: &prefix.joined(),
            cluster: Expr::reference(&cluster),
            task_definition: Expr::reference(&task_definition),
            desired_count: params.task_count,
            security_group: Expr::get_att(&security_group, "GroupId"),
            subnets: &vpc.private_subnet_ids,
        })))
        .depends_on(&roles.task_policy)
        .depends_on(&roles.task),
    )?;

    declare_scaling(&mut stack, config, &prefix, &cluster, &service)?;

    if let Some(repository) = &repository {
        stack.add_output(
            "RepositoryUri",
            Output::new(
                "Runner image repository",
                Expr::get_att(&repository.logical_id, "RepositoryUri"),
            ),
        );
    }
    stack.add_output("ClusterName", Output::new("ECS cluster", Expr::reference(&cluster)));
    stack.add_output(
        "ServiceName",
        Output::new("Runner service", Expr::get_att(&service, "Name")),
    );
    stack.add_output(
        "GitHubSecretArn",
        Output::new("Secret to store the GitHub access token in", Expr::reference(&secret)),
    );
    stack.add_output("LogGroupName", Output::new("Runner logs", Expr::reference(&log_group)));

    tracing::info!(
        stack = %stack.name(),
        resources = stack.resource_count(),
        images = stack.images().len(),
        "declared runner stack"
    );
    Ok(stack)
}

fn declare_repository(
    stack: &mut Stack,
    config: &BuildConfig,
    prefix: &StackPrefix,
) -> Result<RepositoryRef, StackError> {
    let params = &config.parameters;
    let props = build_repository(&RepositoryParams {
        name: &params.ecr_repo_name,
        owner_account: &config.aws_account_id,
        pull_accounts: &params.base_image_access_accounts,
        max_image_count: REPOSITORY_MAX_IMAGES,
    });
    let id = stack.add(
        &prefix.construct_id("Repository"),
        Resource::new(Properties::Repository(props)).removal_policy(RemovalPolicy::Delete),
    )?;
    Ok(RepositoryRef::new(id, &params.ecr_repo_name, &config.aws_account_id, &config.aws_region))
}

fn declare_image_publish(
    stack: &mut Stack,
    config: &BuildConfig,
    options: &DeclareOptions,
    prefix: &StackPrefix,
    repository: &RepositoryRef,
) -> Result<(), StackError> {
    let asset = ImageAsset::new(
        prefix.construct_id("DockerImage"),
        options.project_dir.join(&config.parameters.container_build_path),
    )
    .build_arg(BUILD_DATE_ARG, &options.build_date);
    let asset_id = asset.construct_id.clone();
    stack.add_image(asset)?;
    stack.add_publish(ImagePublish {
        construct_id: prefix.construct_id("DeployDockerImage"),
        asset: asset_id,
        repository: repository.clone(),
        tag: config.version.clone(),
    })
}

fn declare_cluster(stack: &mut Stack, prefix: &StackPrefix) -> Result<LogicalId, StackError> {
    let cluster = stack.add(
        &prefix.construct_id("Cluster"),
        Resource::new(Properties::Cluster(ClusterProps::new(
            format!("{}Cluster", prefix.hyphenated()),
            true,
        ))),
    )?;
    stack.add(
        &prefix.construct_id("ClusterCapacityProviders"),
        Resource::new(Properties::CapacityProviders(CapacityProviderAssociationsProps::fargate(
            Expr::reference(&cluster),
        ))),
    )?;
    Ok(cluster)
}

/// Execution and task roles with their inline policies.
struct TaskRoles {
    execution: LogicalId,
    task: LogicalId,
    task_policy: LogicalId,
}

fn declare_task_roles(
    stack: &mut Stack,
    prefix: &StackPrefix,
    log_group: &LogicalId,
    secret: &LogicalId,
) -> Result<TaskRoles, StackError> {
    let execution = stack.add(
        &prefix.construct_id("TaskDefinitionExecutionRole"),
        Resource::new(Properties::Role(RoleProps::assumed_by(ECS_TASKS_PRINCIPAL))),
    )?;
    let task = stack.add(
        &prefix.construct_id("TaskDefinitionTaskRole"),
        Resource::new(Properties::Role(RoleProps::assumed_by(ECS_TASKS_PRINCIPAL))),
    )?;

    attach_policy(
        stack,
        &prefix.construct_id("TaskDefinitionExecutionRoleDefaultPolicy"),
        &execution,
        vec![
            iam::execution_role_base(),
            iam::log_group_write(Expr::get_att(log_group, "Arn")),
            iam::secret_read(Expr::reference(secret)),
        ],
    )?;
    let task_policy = attach_policy(
        stack,
        &prefix.construct_id("TaskDefinitionTaskRoleDefaultPolicy"),
        &task,
        vec![iam::exec_channels(), iam::task_role_base(), iam::task_role_customization()],
    )?;

    Ok(TaskRoles { execution, task, task_policy })
}

fn attach_policy(
    stack: &mut Stack,
    construct_id: &str,
    role: &LogicalId,
    statements: Vec<PolicyStatement>,
) -> Result<LogicalId, StackError> {
    stack.add(
        construct_id,
        Resource::new(Properties::Policy(PolicyProps {
            policy_name: construct_id.to_string(),
            policy_document: PolicyDocument::new(statements),
            roles: vec![Expr::reference(role)],
        })),
    )
}

fn declare_task_definition(
    stack: &mut Stack,
    config: &BuildConfig,
    prefix: &StackPrefix,
    roles: &TaskRoles,
    log_group: &LogicalId,
    secret: &LogicalId,
) -> Result<LogicalId, StackError> {
    let params = &config.parameters;
    let size = TaskSize::parse(&params.task_cpu, &params.task_mem)?;
    let name = prefix.joined();

    let container = build_container(ContainerParams {
        name: &name,
        image: runner_image(config),
        environment: vec![
            ("ENVIRONMENT", config.environment.clone()),
            ("RUNNER_LABELS", name.clone()),
            ("RUNNER_ORGANIZATION_URL", params.organization_url.clone()),
        ],
        secrets: vec![("GITHUB_ACCESS_TOKEN", Expr::reference(secret))],
        logging: LogConfiguration::awslogs(Expr::reference(log_group), &name, &config.aws_region),
    });

    stack.add(
        &prefix.construct_id("TaskDefinition"),
        Resource::new(Properties::TaskDefinition(build_task_definition(TaskDefinitionParams {
            family: &prefix.hyphenated(),
            cpu: size.cpu,
            memory: size.memory,
            execution_role_arn: Expr::get_att(&roles.execution, "Arn"),
            task_role_arn: Expr::get_att(&roles.task, "Arn"),
            container,
        }))),
    )
}

/// `{ecrSourceAccount}.dkr.ecr.us-east-1.amazonaws.com/{ecrRepoName}:{Version}`
pub fn runner_image(config: &BuildConfig) -> String {
    let params = &config.parameters;
    format!(
        "{}:{}",
        registry_uri(&params.ecr_source_account, IMAGE_REGISTRY_REGION, &params.ecr_repo_name),
        config.version
    )
}

fn declare_scaling(
    stack: &mut Stack,
    config: &BuildConfig,
    prefix: &StackPrefix,
    cluster: &LogicalId,
    service: &LogicalId,
) -> Result<(), StackError> {
    let params = &config.parameters;
    check_scaling(params)?;

    let target = stack.add(
        &prefix.construct_id("FargateTaskCountTarget"),
        Resource::new(Properties::ScalableTarget(ScalableTargetProps::ecs_service(
            &config.aws_account_id,
            Expr::reference(cluster),
            Expr::get_att(service, "Name"),
            params.task_min,
            params.task_max,
        ))),
    )?;

    for (suffix, metric, value) in [
        ("CpuScale", PredefinedMetric::Cpu, params.max_cpu),
        ("MemScale", PredefinedMetric::Memory, params.max_mem),
    ] {
        let id = prefix.construct_id(suffix);
        stack.add(
            &id,
            Resource::new(Properties::ScalingPolicy(ScalingPolicyProps::target_tracking(
                &id,
                Expr::reference(&target),
                metric,
                value,
            ))),
        )?;
    }
    Ok(())
}

fn check_scaling(params: &BuildParameters) -> Result<(), StackError> {
    if params.task_min > params.task_max {
        return Err(StackError::ScalingBounds { min: params.task_min, max: params.task_max });
    }
    for (field, value) in [("maxCpu", params.max_cpu), ("maxMem", params.max_mem)] {
        if !(value > 0.0 && value <= 100.0) {
            return Err(StackError::UtilizationTarget { field, value });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
