// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed CloudFormation property structs, one module per AWS service.

pub mod autoscaling;
pub mod ecr;
pub mod ecs;
pub mod iam;
pub mod logs;
pub mod network;
pub mod secrets;
