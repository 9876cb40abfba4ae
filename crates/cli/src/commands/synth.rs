// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ghr synth`: declare the runner stack and write the cloud assembly.

use anyhow::Result;
use clap::Args;
use ghr_config::load_config;
use ghr_core::SystemClock;
use ghr_stack::{declare_runner_stack, synthesize, DeclareOptions, SynthReport, DEFAULT_OUT_DIR};
use std::io::Write;
use std::path::PathBuf;

use super::ContextArgs;
use crate::color;
use crate::output::{write_fields, OutputFormat};

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SynthArgs {
    #[command(flatten)]
    pub context: ContextArgs,

    /// Cloud assembly output directory
    #[arg(short = 'O', long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,
}

pub fn handle(args: SynthArgs, format: OutputFormat) -> Result<()> {
    let context = args.context.load()?;
    let config = load_config(&context)?;
    let options = DeclareOptions::new(&args.context.project, &SystemClock);
    let stack = declare_runner_stack(&config, &options)?;
    let report = synthesize(&stack, &args.out)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => render_report(&report, &mut std::io::stdout())?,
    }
    Ok(())
}

pub(crate) fn render_report(report: &SynthReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Synthesized {}", color::header(&report.stack))?;
    let mut rows = vec![
        ("directory", report.directory.display().to_string()),
        ("template", report.template.display().to_string()),
        ("resources", report.resources.to_string()),
    ];
    match &report.assets {
        Some(assets) => rows.push(("assets", assets.display().to_string())),
        None => rows.push(("assets", color::muted("none"))),
    }
    rows.push(("manifest", report.manifest.display().to_string()));
    write_fields(out, &rows)?;

    for image in &report.images {
        writeln!(out, "  {} {}", color::muted(&image.hash), color::literal(&image.destination))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "synth_tests.rs"]
mod tests;
