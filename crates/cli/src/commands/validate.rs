// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ghr validate`: load the selected environment and declare its stack
//! without writing anything.

use anyhow::Result;
use clap::Args;
use ghr_config::{load_config, BuildConfig};
use ghr_core::SystemClock;
use ghr_stack::{declare_runner_stack, runner_image, DeclareOptions, StackEnv};
use serde::Serialize;
use std::io::Write;

use super::ContextArgs;
use crate::color;
use crate::output::{write_fields, OutputFormat};

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub context: ContextArgs,
}

#[derive(Debug, Serialize)]
pub(crate) struct Validated<'a> {
    stack: String,
    resources: usize,
    image: String,
    config: &'a BuildConfig,
}

pub fn handle(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let context = args.context.load()?;
    let config = load_config(&context)?;
    let options = DeclareOptions::new(&args.context.project, &SystemClock);
    let stack = declare_runner_stack(&config, &options)?;

    let validated = Validated {
        stack: stack.name().to_string(),
        resources: stack.resource_count(),
        image: runner_image(&config),
        config: &config,
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&validated)?),
        OutputFormat::Text => render_summary(&validated, &mut std::io::stdout())?,
    }
    Ok(())
}

pub(crate) fn render_summary(validated: &Validated<'_>, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{} is valid", color::header(&validated.stack))?;
    write_fields(out, &summary_rows(validated))
}

pub(crate) fn summary_rows(validated: &Validated<'_>) -> Vec<(&'static str, String)> {
    let config = validated.config;
    let params = &config.parameters;
    let repository = if config.is_build_environment() {
        format!("{} (owned)", params.ecr_repo_name)
    } else {
        format!("{} (pulled from {})", params.ecr_repo_name, params.ecr_source_account)
    };
    let build = if params.skip_container_build {
        color::muted("skipped")
    } else {
        format!("{} from {}", color::literal("publish"), params.container_build_path)
    };

    vec![
        ("env", StackEnv::new(&config.aws_account_id, &config.aws_region).to_string()),
        ("team", config.team.clone()),
        ("version", config.version.clone()),
        ("size", format!("{} cpu / {} memory", params.task_cpu, params.task_mem)),
        ("tasks", format!("{} (min {}, max {})", params.task_count, params.task_min, params.task_max)),
        ("scaling", format!("cpu {}%, memory {}%", params.max_cpu, params.max_mem)),
        ("image", validated.image.clone()),
        ("repository", repository),
        ("build", build),
        ("resources", validated.resources.to_string()),
    ]
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
