// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IAM roles, inline policies and policy documents.

use crate::template::Expr;
use ghr_core::Tag;
use serde::Serialize;

pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
}

/// Who a resource policy statement applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Principal {
    /// `{"AWS": "arn:aws:iam::<account>:root"}`
    #[serde(rename = "AWS")]
    Account(String),
    /// `{"Service": "ecs-tasks.amazonaws.com"}`
    Service(String),
}

impl Principal {
    pub fn account(account_id: &str) -> Self {
        Self::Account(format!("arn:aws:iam::{account_id}:root"))
    }

    pub fn service(service: impl Into<String>) -> Self {
        Self::Service(service.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub effect: Effect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    pub action: Vec<String>,
    /// Absent on resource policies, where the resource is implied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Vec<Expr>>,
}

impl PolicyStatement {
    /// An identity-policy `Allow` statement.
    pub fn allow(actions: &[&str], resources: Vec<Expr>) -> Self {
        Self {
            sid: None,
            effect: Effect::Allow,
            principal: None,
            action: actions.iter().map(|a| a.to_string()).collect(),
            resource: Some(resources),
        }
    }

    /// A resource-policy `Allow` statement for `principal`.
    pub fn allow_principal(principal: Principal, actions: &[&str]) -> Self {
        Self {
            sid: None,
            effect: Effect::Allow,
            principal: Some(principal),
            action: actions.iter().map(|a| a.to_string()).collect(),
            resource: None,
        }
    }

    pub fn sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.action.iter().any(|a| a == action)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: &'static str,
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self { version: POLICY_VERSION, statement }
    }

    pub fn statement(&self, sid: &str) -> Option<&PolicyStatement> {
        self.statement.iter().find(|s| s.sid.as_deref() == Some(sid))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProps {
    pub assume_role_policy_document: PolicyDocument,
    pub tags: Vec<Tag>,
}

impl RoleProps {
    /// A role the given service principal may assume.
    pub fn assumed_by(service: &str) -> Self {
        let trust = PolicyStatement::allow_principal(Principal::service(service), &["sts:AssumeRole"]);
        Self { assume_role_policy_document: PolicyDocument::new(vec![trust]), tags: Vec::new() }
    }
}

/// An inline policy attached to one or more roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyProps {
    pub policy_name: String,
    pub policy_document: PolicyDocument,
    pub roles: Vec<Expr>,
}

// Static grants for runner tasks

pub const EXECUTION_ROLE_BASE: &str = "ExecutionRoleBase";
pub const TASK_ROLE_BASE: &str = "TaskRoleBase";
pub const TASK_ROLE_CUSTOMIZATION: &str = "TaskRoleCustomization";

/// Image pulls, key access and log group creation for the ECS agent.
pub fn execution_role_base() -> PolicyStatement {
    PolicyStatement::allow(
        &[
            "ecr:GetAuthorizationToken",
            "ecr:BatchCheckLayerAvailability",
            "ecr:GetDownloadUrlForLayer",
            "ecr:BatchGetImage",
            "kms:Decrypt",
            "kms:DescribeKey",
            "logs:CreateLogGroup",
        ],
        vec![Expr::literal("*")],
    )
    .sid(EXECUTION_ROLE_BASE)
}

/// Logging, parameter and secret reads for the runner process.
pub fn task_role_base() -> PolicyStatement {
    PolicyStatement::allow(
        &[
            "logs:CreateLogStream",
            "logs:PutLogEvents",
            "ssm:GetParameters",
            "secretsmanager:GetSecretValue",
            "kms:Decrypt",
            "kms:DescribeKey",
        ],
        vec![Expr::literal("*")],
    )
    .sid(TASK_ROLE_BASE)
}

/// Credentials the CI jobs themselves need.
pub fn task_role_customization() -> PolicyStatement {
    PolicyStatement::allow(
        &["sts:GetFederationToken", "sts:AssumeRole", "iam:PassRole"],
        vec![Expr::literal("*")],
    )
    .sid(TASK_ROLE_CUSTOMIZATION)
}

/// Stream creation and writes into one log group.
pub fn log_group_write(log_group_arn: Expr) -> PolicyStatement {
    PolicyStatement::allow(&["logs:CreateLogStream", "logs:PutLogEvents"], vec![log_group_arn])
}

/// Read access to one secret.
pub fn secret_read(secret_arn: Expr) -> PolicyStatement {
    PolicyStatement::allow(
        &["secretsmanager:GetSecretValue", "secretsmanager:DescribeSecret"],
        vec![secret_arn],
    )
}

/// Session Manager channels used by ECS Exec.
pub fn exec_channels() -> PolicyStatement {
    PolicyStatement::allow(
        &[
            "ssmmessages:CreateControlChannel",
            "ssmmessages:CreateDataChannel",
            "ssmmessages:OpenControlChannel",
            "ssmmessages:OpenDataChannel",
        ],
        vec![Expr::literal("*")],
    )
}

#[cfg(test)]
#[path = "iam_tests.rs"]
mod tests;
