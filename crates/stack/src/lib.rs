// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ghr-stack: runner stack declaration and cloud assembly synthesis

pub mod assets;
mod error;
pub mod fargate;
pub mod resources;
mod runner;
mod stack;
mod synth;
pub mod template;

pub use assets::{ImageAsset, ImagePublish};
pub use error::{StackError, SynthError};
pub use fargate::TaskSize;
pub use runner::{
    build_date, declare_runner_stack, runner_image, DeclareOptions, IMAGE_REGISTRY_REGION,
    LOG_RETENTION_DAYS, REPOSITORY_MAX_IMAGES,
};
pub use stack::{Stack, StackEnv};
pub use synth::{
    synthesize, PublishedImage, SynthReport, ASSEMBLY_VERSION, DEFAULT_OUT_DIR, MANIFEST_FILE,
};
pub use template::{Expr, Output, Properties, RemovalPolicy, Resource, Template};
