// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CloudFormation template primitives: intrinsic expressions, resources
//! and outputs.

use crate::resources::{
    autoscaling::{ScalableTargetProps, ScalingPolicyProps},
    ecr::RepositoryProps,
    ecs::{CapacityProviderAssociationsProps, ClusterProps, ServiceProps, TaskDefinitionProps},
    iam::{PolicyProps, RoleProps},
    logs::LogGroupProps,
    network::SecurityGroupProps,
    secrets::SecretProps,
};
use ghr_core::{LogicalId, Tag};
use indexmap::IndexMap;
use serde::Serialize;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A property value: a literal or one of the intrinsic functions the runner
/// stack needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Literal(String),
    Ref {
        #[serde(rename = "Ref")]
        target: LogicalId,
    },
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: (LogicalId, &'static str),
    },
    Join {
        #[serde(rename = "Fn::Join")]
        parts: (&'static str, Vec<Expr>),
    },
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn reference(target: &LogicalId) -> Self {
        Self::Ref { target: target.clone() }
    }

    pub fn get_att(target: &LogicalId, attribute: &'static str) -> Self {
        Self::GetAtt { target: (target.clone(), attribute) }
    }

    /// `Fn::Join` with an empty separator.
    pub fn concat(parts: Vec<Expr>) -> Self {
        Self::Join { parts: ("", parts) }
    }

    /// Logical ids this expression refers to.
    pub fn references(&self) -> Vec<&LogicalId> {
        match self {
            Self::Literal(_) => Vec::new(),
            Self::Ref { target } => vec![target],
            Self::GetAtt { target } => vec![&target.0],
            Self::Join { parts } => parts.1.iter().flat_map(Expr::references).collect(),
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// What happens to the physical resource when it leaves the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    Delete,
    Retain,
}

ghr_core::simple_display! {
    RemovalPolicy {
        Delete => "Delete",
        Retain => "Retain",
    }
}

/// Typed properties of every resource kind the runner stack declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Properties {
    Repository(RepositoryProps),
    LogGroup(LogGroupProps),
    SecurityGroup(SecurityGroupProps),
    Secret(SecretProps),
    Cluster(ClusterProps),
    CapacityProviders(CapacityProviderAssociationsProps),
    Role(RoleProps),
    Policy(PolicyProps),
    TaskDefinition(TaskDefinitionProps),
    Service(ServiceProps),
    ScalableTarget(ScalableTargetProps),
    ScalingPolicy(ScalingPolicyProps),
}

impl Properties {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Self::Repository(_) => "AWS::ECR::Repository",
            Self::LogGroup(_) => "AWS::Logs::LogGroup",
            Self::SecurityGroup(_) => "AWS::EC2::SecurityGroup",
            Self::Secret(_) => "AWS::SecretsManager::Secret",
            Self::Cluster(_) => "AWS::ECS::Cluster",
            Self::CapacityProviders(_) => "AWS::ECS::ClusterCapacityProviderAssociations",
            Self::Role(_) => "AWS::IAM::Role",
            Self::Policy(_) => "AWS::IAM::Policy",
            Self::TaskDefinition(_) => "AWS::ECS::TaskDefinition",
            Self::Service(_) => "AWS::ECS::Service",
            Self::ScalableTarget(_) => "AWS::ApplicationAutoScaling::ScalableTarget",
            Self::ScalingPolicy(_) => "AWS::ApplicationAutoScaling::ScalingPolicy",
        }
    }

    /// The resource's tag list, for kinds that accept tags.
    pub fn tags_mut(&mut self) -> Option<&mut Vec<Tag>> {
        match self {
            Self::Repository(p) => Some(&mut p.tags),
            Self::LogGroup(p) => Some(&mut p.tags),
            Self::SecurityGroup(p) => Some(&mut p.tags),
            Self::Secret(p) => Some(&mut p.tags),
            Self::Cluster(p) => Some(&mut p.tags),
            Self::Role(p) => Some(&mut p.tags),
            Self::TaskDefinition(p) => Some(&mut p.tags),
            Self::Service(p) => Some(&mut p.tags),
            Self::CapacityProviders(_)
            | Self::Policy(_)
            | Self::ScalableTarget(_)
            | Self::ScalingPolicy(_) => None,
        }
    }
}

/// One entry of the template's `Resources` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: &'static str,
    #[serde(rename = "Properties")]
    pub properties: Properties,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<LogicalId>,
    #[serde(rename = "UpdateReplacePolicy", skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<RemovalPolicy>,
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<RemovalPolicy>,
}

impl Resource {
    pub fn new(properties: Properties) -> Self {
        Self {
            resource_type: properties.resource_type(),
            properties,
            depends_on: Vec::new(),
            update_replace_policy: None,
            deletion_policy: None,
        }
    }

    /// Set both the deletion and update-replace policy.
    pub fn removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.update_replace_policy = Some(policy);
        self.deletion_policy = Some(policy);
        self
    }

    pub fn depends_on(mut self, id: &LogicalId) -> Self {
        if !self.depends_on.contains(id) {
            self.depends_on.push(id.clone());
        }
        self
    }
}

/// A stack output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Value")]
    pub value: Expr,
}

impl Output {
    pub fn new(description: impl Into<String>, value: Expr) -> Self {
        Self { description: description.into(), value }
    }
}

/// The serialized form of a stack.
#[derive(Debug, Serialize)]
pub struct Template<'a> {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: &'static str,
    #[serde(rename = "Description")]
    pub description: &'a str,
    #[serde(rename = "Resources")]
    pub resources: &'a IndexMap<LogicalId, Resource>,
    #[serde(rename = "Outputs", skip_serializing_if = "no_outputs")]
    pub outputs: &'a IndexMap<String, Output>,
}

fn no_outputs(outputs: &&IndexMap<String, Output>) -> bool {
    outputs.is_empty()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
