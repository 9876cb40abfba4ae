// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Network placement of the runner tasks.

use crate::error::StackError;
use crate::template::Expr;
use ghr_core::Tag;
use serde::Serialize;

/// An existing VPC described by attributes. Nothing is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcPlacement {
    pub vpc_id: String,
    pub availability_zones: Vec<String>,
    pub private_subnet_ids: Vec<String>,
}

impl VpcPlacement {
    /// Subnets are assigned to zones round-robin, so their count must be a
    /// multiple of the zone count.
    pub fn from_attributes(
        vpc_id: &str,
        availability_zones: &[String],
        private_subnet_ids: &[String],
    ) -> Result<Self, StackError> {
        let zones = availability_zones.len();
        let subnets = private_subnet_ids.len();
        if zones == 0 || subnets == 0 || subnets % zones != 0 {
            return Err(StackError::SubnetLayout { subnets, zones });
        }
        Ok(Self {
            vpc_id: vpc_id.to_string(),
            availability_zones: availability_zones.to_vec(),
            private_subnet_ids: private_subnet_ids.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EgressRule {
    pub cidr_ip: String,
    pub description: String,
    pub ip_protocol: String,
}

impl EgressRule {
    pub fn all_outbound() -> Self {
        Self {
            cidr_ip: "0.0.0.0/0".to_string(),
            description: "Allow all outbound traffic by default".to_string(),
            ip_protocol: "-1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupProps {
    pub group_description: String,
    pub group_name: String,
    pub security_group_egress: Vec<EgressRule>,
    pub vpc_id: Expr,
    pub tags: Vec<Tag>,
}

impl SecurityGroupProps {
    /// No ingress; everything outbound.
    pub fn outbound_only(name: &str, description: &str, vpc: &VpcPlacement) -> Self {
        Self {
            group_description: description.to_string(),
            group_name: name.to_string(),
            security_group_egress: vec![EgressRule::all_outbound()],
            vpc_id: Expr::literal(&vpc.vpc_id),
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
