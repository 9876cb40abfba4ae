// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replica-count scaling for ECS services.

use crate::template::Expr;
use serde::Serialize;

pub const ECS_DESIRED_COUNT: &str = "ecs:service:DesiredCount";

/// Metric a target-tracking policy holds at its target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredefinedMetric {
    #[serde(rename = "ECSServiceAverageCPUUtilization")]
    Cpu,
    #[serde(rename = "ECSServiceAverageMemoryUtilization")]
    Memory,
}

ghr_core::simple_display! {
    PredefinedMetric {
        Cpu => "cpu",
        Memory => "memory",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScalableTargetProps {
    pub max_capacity: u32,
    pub min_capacity: u32,
    #[serde(rename = "ResourceId")]
    pub resource_id: Expr,
    #[serde(rename = "RoleARN")]
    pub role_arn: String,
    pub scalable_dimension: String,
    pub service_namespace: String,
}

impl ScalableTargetProps {
    /// Desired-count target for an ECS service in `account`.
    pub fn ecs_service(account: &str, cluster: Expr, service_name: Expr, min: u32, max: u32) -> Self {
        Self {
            max_capacity: max,
            min_capacity: min,
            resource_id: Expr::concat(vec![
                Expr::literal("service/"),
                cluster,
                Expr::literal("/"),
                service_name,
            ]),
            role_arn: format!(
                "arn:aws:iam::{account}:role/aws-service-role/ecs.application-autoscaling.amazonaws.com/AWSServiceRoleForApplicationAutoScaling_ECSService"
            ),
            scalable_dimension: ECS_DESIRED_COUNT.to_string(),
            service_namespace: "ecs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredefinedMetricSpecification {
    pub predefined_metric_type: PredefinedMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetTrackingConfiguration {
    pub predefined_metric_specification: PredefinedMetricSpecification,
    pub target_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScalingPolicyProps {
    pub policy_name: String,
    pub policy_type: String,
    pub scaling_target_id: Expr,
    pub target_tracking_scaling_policy_configuration: TargetTrackingConfiguration,
}

impl ScalingPolicyProps {
    pub fn target_tracking(name: &str, target: Expr, metric: PredefinedMetric, value: f64) -> Self {
        Self {
            policy_name: name.to_string(),
            policy_type: "TargetTrackingScaling".to_string(),
            scaling_target_id: target,
            target_tracking_scaling_policy_configuration: TargetTrackingConfiguration {
                predefined_metric_specification: PredefinedMetricSpecification {
                    predefined_metric_type: metric,
                },
                target_value: value,
            },
        }
    }
}
