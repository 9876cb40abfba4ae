// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn ghr_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("synth")
        .stdout_has("validate")
        .stdout_has("list");
}

#[test]
fn ghr_without_subcommand_is_usage_error() {
    cli().exits(2).stderr_has("Usage:");
}

#[test]
fn ghr_synth_help_shows_context_flags() {
    cli()
        .args(&["synth", "--help"])
        .passes()
        .stdout_has("--context")
        .stdout_has("--context-file")
        .stdout_has("--out");
}

#[test]
fn ghr_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has(env!("CARGO_PKG_VERSION"));
}
