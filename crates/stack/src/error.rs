// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while declaring and synthesizing a stack.

use ghr_core::{LogicalId, NamingError};
use std::path::PathBuf;
use thiserror::Error;

/// A configuration the resource topology cannot be built from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StackError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("logical id '{0}' is declared twice")]
    DuplicateLogicalId(LogicalId),

    #[error(
        "environment '{environment}' publishes an image but only '{build_environment}' declares \
         the repository; set skipContainerBuild to true"
    )]
    PublishWithoutRepository { environment: String, build_environment: String },

    #[error("{subnets} private subnets cannot be spread evenly over {zones} availability zones")]
    SubnetLayout { subnets: usize, zones: usize },

    #[error("'{value}' is not a valid {field}")]
    InvalidTaskUnit { field: &'static str, value: String },

    #[error("Fargate does not offer {memory} MiB of memory with {cpu} CPU units")]
    InvalidTaskSize { cpu: u32, memory: u32 },

    #[error("taskMin ({min}) is greater than taskMax ({max})")]
    ScalingBounds { min: u32, max: u32 },

    #[error("{field} must be a percentage in (0, 100], got {value}")]
    UtilizationTarget { field: &'static str, value: f64 },
}

/// Failure writing a cloud assembly.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {artifact}: {source}")]
    Json {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read image build context {path}: {source}")]
    BuildContext {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
