// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ECS cluster, Fargate task definition and service.

use crate::template::Expr;
use ghr_core::Tag;
use indexmap::IndexMap;
use serde::Serialize;

pub const FARGATE: &str = "FARGATE";
pub const FARGATE_SPOT: &str = "FARGATE_SPOT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterSetting {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterProps {
    pub cluster_name: String,
    pub cluster_settings: Vec<ClusterSetting>,
    pub tags: Vec<Tag>,
}

impl ClusterProps {
    pub fn new(name: impl Into<String>, container_insights: bool) -> Self {
        let value = if container_insights { "enabled" } else { "disabled" };
        Self {
            cluster_name: name.into(),
            cluster_settings: vec![ClusterSetting {
                name: "containerInsights".to_string(),
                value: value.to_string(),
            }],
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapacityProviderStrategyItem {
    pub capacity_provider: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapacityProviderAssociationsProps {
    pub capacity_providers: Vec<String>,
    pub cluster: Expr,
    pub default_capacity_provider_strategy: Vec<CapacityProviderStrategyItem>,
}

impl CapacityProviderAssociationsProps {
    /// Make the Fargate providers available without changing the default
    /// strategy.
    pub fn fargate(cluster: Expr) -> Self {
        Self {
            capacity_providers: vec![FARGATE.to_string(), FARGATE_SPOT.to_string()],
            cluster,
            default_capacity_provider_strategy: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerSecret {
    pub name: String,
    pub value_from: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    pub options: IndexMap<String, Expr>,
}

impl LogConfiguration {
    pub fn awslogs(group: Expr, stream_prefix: &str, region: &str) -> Self {
        let mut options = IndexMap::new();
        options.insert("awslogs-group".to_string(), group);
        options.insert("awslogs-stream-prefix".to_string(), Expr::literal(stream_prefix));
        options.insert("awslogs-region".to_string(), Expr::literal(region));
        Self { log_driver: "awslogs".to_string(), options }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    pub essential: bool,
    pub environment: Vec<KeyValuePair>,
    pub secrets: Vec<ContainerSecret>,
    pub log_configuration: LogConfiguration,
}

/// Parameters for the single runner container.
pub struct ContainerParams<'a> {
    pub name: &'a str,
    pub image: String,
    pub environment: Vec<(&'static str, String)>,
    pub secrets: Vec<(&'static str, Expr)>,
    pub logging: LogConfiguration,
}

pub fn build_container(params: ContainerParams<'_>) -> ContainerDefinition {
    ContainerDefinition {
        name: params.name.to_string(),
        image: params.image,
        essential: true,
        environment: params
            .environment
            .into_iter()
            .map(|(name, value)| KeyValuePair { name: name.to_string(), value })
            .collect(),
        secrets: params
            .secrets
            .into_iter()
            .map(|(name, value_from)| ContainerSecret { name: name.to_string(), value_from })
            .collect(),
        log_configuration: params.logging,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimePlatform {
    pub cpu_architecture: String,
    pub operating_system_family: String,
}

impl RuntimePlatform {
    pub fn linux_x86_64() -> Self {
        Self { cpu_architecture: "X86_64".to_string(), operating_system_family: "LINUX".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskDefinitionProps {
    pub family: String,
    pub cpu: String,
    pub memory: String,
    pub network_mode: String,
    pub requires_compatibilities: Vec<String>,
    pub runtime_platform: RuntimePlatform,
    pub execution_role_arn: Expr,
    pub task_role_arn: Expr,
    pub container_definitions: Vec<ContainerDefinition>,
    pub tags: Vec<Tag>,
}

/// Parameters for a Fargate task definition.
pub struct TaskDefinitionParams<'a> {
    pub family: &'a str,
    pub cpu: u32,
    pub memory: u32,
    pub execution_role_arn: Expr,
    pub task_role_arn: Expr,
    pub container: ContainerDefinition,
}

pub fn build_task_definition(params: TaskDefinitionParams<'_>) -> TaskDefinitionProps {
    TaskDefinitionProps {
        family: params.family.to_string(),
        cpu: params.cpu.to_string(),
        memory: params.memory.to_string(),
        network_mode: "awsvpc".to_string(),
        requires_compatibilities: vec![FARGATE.to_string()],
        runtime_platform: RuntimePlatform::linux_x86_64(),
        execution_role_arn: params.execution_role_arn,
        task_role_arn: params.task_role_arn,
        container_definitions: vec![params.container],
        tags: Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentCircuitBreaker {
    pub enable: bool,
    pub rollback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentConfiguration {
    pub deployment_circuit_breaker: DeploymentCircuitBreaker,
    pub maximum_percent: u32,
    pub minimum_healthy_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsVpcConfiguration {
    pub assign_public_ip: String,
    pub security_groups: Vec<Expr>,
    pub subnets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkConfiguration {
    #[serde(rename = "AwsvpcConfiguration")]
    pub awsvpc_configuration: AwsVpcConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceProps {
    pub service_name: String,
    pub cluster: Expr,
    pub task_definition: Expr,
    pub desired_count: u32,
    pub launch_type: String,
    pub enable_execute_command: bool,
    pub deployment_configuration: DeploymentConfiguration,
    pub network_configuration: NetworkConfiguration,
    pub tags: Vec<Tag>,
}

/// Parameters for a Fargate service without a load balancer.
pub struct ServiceParams<'a> {
    pub name: &'a str,
    pub cluster: Expr,
    pub task_definition: Expr,
    pub desired_count: u32,
    pub security_group: Expr,
    pub subnets: &'a [String],
}

pub fn build_service(params: ServiceParams<'_>) -> ServiceProps {
    ServiceProps {
        service_name: params.name.to_string(),
        cluster: params.cluster,
        task_definition: params.task_definition,
        desired_count: params.desired_count,
        launch_type: FARGATE.to_string(),
        enable_execute_command: true,
        deployment_configuration: DeploymentConfiguration {
            deployment_circuit_breaker: DeploymentCircuitBreaker { enable: true, rollback: true },
            maximum_percent: 200,
            minimum_healthy_percent: 50,
        },
        network_configuration: NetworkConfiguration {
            awsvpc_configuration: AwsVpcConfiguration {
                assign_public_ip: "DISABLED".to_string(),
                security_groups: vec![params.security_group],
                subnets: params.subnets.to_vec(),
            },
        },
        tags: Vec::new(),
    }
}
