// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image repository.

use super::iam::{PolicyDocument, PolicyStatement, Principal};
use ghr_core::{LogicalId, Tag};
use serde::Serialize;
use serde_json::json;

pub const PULL_ACTIONS: &[&str] =
    &["ecr:BatchCheckLayerAvailability", "ecr:GetDownloadUrlForLayer", "ecr:BatchGetImage"];

pub const PUSH_ACTIONS: &[&str] = &[
    "ecr:PutImage",
    "ecr:InitiateLayerUpload",
    "ecr:UploadLayerPart",
    "ecr:CompleteLayerUpload",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecyclePolicy {
    pub lifecycle_policy_text: String,
}

impl LifecyclePolicy {
    /// Expire everything beyond the newest `count` images.
    pub fn max_image_count(count: u32) -> Self {
        let rules = json!({
            "rules": [{
                "rulePriority": 1,
                "selection": {
                    "tagStatus": "any",
                    "countType": "imageCountMoreThan",
                    "countNumber": count,
                },
                "action": { "type": "expire" },
            }]
        });
        Self { lifecycle_policy_text: rules.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryProps {
    pub repository_name: String,
    pub lifecycle_policy: LifecyclePolicy,
    pub repository_policy_text: PolicyDocument,
    pub tags: Vec<Tag>,
}

/// Parameters for an image repository.
pub struct RepositoryParams<'a> {
    pub name: &'a str,
    /// Account that builds and pushes images.
    pub owner_account: &'a str,
    /// Accounts that only pull.
    pub pull_accounts: &'a [String],
    pub max_image_count: u32,
}

pub fn build_repository(params: &RepositoryParams<'_>) -> RepositoryProps {
    let pull_push: Vec<&str> = PULL_ACTIONS.iter().chain(PUSH_ACTIONS).copied().collect();
    let mut statements =
        vec![PolicyStatement::allow_principal(Principal::account(params.owner_account), &pull_push)];
    for account in params.pull_accounts {
        statements.push(PolicyStatement::allow_principal(Principal::account(account), PULL_ACTIONS));
    }

    RepositoryProps {
        repository_name: params.name.to_string(),
        lifecycle_policy: LifecyclePolicy::max_image_count(params.max_image_count),
        repository_policy_text: PolicyDocument::new(statements),
        tags: Vec::new(),
    }
}

/// Handle to a declared repository, handed to the steps that publish into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub logical_id: LogicalId,
    pub name: String,
    /// `<account>.dkr.ecr.<region>.amazonaws.com/<name>`
    pub uri: String,
}

impl RepositoryRef {
    pub fn new(logical_id: LogicalId, name: &str, account: &str, region: &str) -> Self {
        Self { logical_id, name: name.to_string(), uri: registry_uri(account, region, name) }
    }
}

/// Registry URI of repository `name` in `account`/`region`.
pub fn registry_uri(account: &str, region: &str, name: &str) -> String {
    format!("{account}.dkr.ecr.{region}.amazonaws.com/{name}")
}
