// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ghr: synthesize the GitHub runner stack for one environment

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{list, synth, validate};
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "ghr",
    version,
    about = "Self-hosted GitHub Actions runners on ECS Fargate",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Declare the stack and write the cloud assembly
    Synth(synth::SynthArgs),
    /// Load and declare the selected environment without writing anything
    Validate(validate::ValidateArgs),
    /// List environments defined in the context
    List(list::ListArgs),
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(exit_error::exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Synth(args) => synth::handle(args, cli.output),
        Commands::Validate(args) => validate::handle(args, cli.output),
        Commands::List(args) => list::handle(args, cli.output),
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(env::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
